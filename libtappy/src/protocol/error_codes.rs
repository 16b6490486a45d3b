// libtappy/src/protocol/error_codes.rs

//! Human-readable descriptions of the reader's global application error
//! codes (the third byte of a `0x7F` error response).

/// Code to description table, sorted by code.
static GLOBAL_ERROR_DETAILS: [(u8, &str); 59] = [
    (0x01, "Invalid content slot number."),
    (0x02, "Invalid content type."),
    (0x03, "NDEF message too big"),
    (0x04, "vCard lengths not received"),
    (0x05, "vCard length mismatch"),
    (0x06, "vCard delimiters missing"),
    (0x07, "vCard parameter length mismatch"),
    (0x08, "A scanning error has occurred."),
    (0x09, "An unrecognized command has been given."),
    (0x0A, "Invalid content slot order for export"),
    (0x0B, "Content slot was not populated with content."),
    (
        0x0C,
        "NDEF formatting error - the OTP bytes are already set to non-NDEF.",
    ),
    (0x0D, "The tag appears to be locked and cannot be written."),
    (0x0E, "Unsupported tag type"),
    (0x0F, "An error occured locking the tag"),
    (0x10, "Tag operation timed out"),
    (
        0x11,
        "An error occured formatting MIFARE Classic application directory sector trailer",
    ),
    (0x12, "An error occured MIFARE Classic sector trailer for NDEF"),
    (0x13, "An error occured writing MIFARE Classic data blocks"),
    (0x14, "Incorrect NONCE size"),
    (0x15, "No previous packet"),
    (0x16, "Invalid picker number"),
    (0x17, "Error adding picker tag"),
    (0x18, "Error getting bin count"),
    (0x19, "Error clearing bin count"),
    (0x1A, "Tag already allocated"),
    (0x1B, "Secondary oscillator not ready, cannot set date/time"),
    (0x1C, "Real-time clock not ready"),
    (0x1D, "Tag not wristband compatible"),
    (0x1E, "Guest data data out of bounds"),
    (0x1F, "Guest number exceeds maximum"),
    (0x20, "An error occured creating guest wristband"),
    (0x21, "An error occured reading guest count"),
    (0x22, "Counter number invalid"),
    (0x23, "Error clearing wristband counter"),
    (0x24, "Out of bounds"),
    (0x25, "Authentication failed"),
    (0x26, "Error reading passport datagroup"),
    (0x27, "Incorrect number of parameters"),
    (0x28, "Provisioning failed"),
    (
        0x29,
        "An error occured while attempting to format tag as NDEF",
    ),
    (0x2A, "Field number exceeds maximum"),
    (0x2B, "Field number not set"),
    (0x2C, "Improper URL format"),
    (0x2D, "Required URL not set"),
    (0x2E, "Corrupt field data"),
    (0x2F, "Required field not set"),
    (0x30, "Multirecord text field number exceeds maximum"),
    (0x31, "Multirecord text field number not set"),
    (0x32, "Multirecord text field not set"),
    (0x33, "Multirecord text field data corrupted"),
    (0x34, "Invalid password diversification method"),
    (0x35, "Incorrect salt length"),
    (0x36, "Formatting error"),
    (0x37, "No NDEF data found"),
    (0x38, "Unrecognized NDEF version"),
    (0x39, "Problem reading NDEF data"),
    (0x3A, "Incorrect UID length for password diversification"),
    (0xFC, "A unknown error has occurred."),
];

/// Look up the description of a global error code. Codes outside the
/// table have no description.
pub fn detail_for_error_code(code: u8) -> Option<&'static str> {
    GLOBAL_ERROR_DETAILS
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|idx| GLOBAL_ERROR_DETAILS[idx].1)
}
