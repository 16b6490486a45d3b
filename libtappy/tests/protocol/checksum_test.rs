#[path = "../common/mod.rs"]
mod common;

use libtappy::protocol::{dcs, lcs};

#[test]
fn lcs_and_dcs_examples() {
    assert_eq!(lcs(0x00, 0x02), 0xfe);
    assert_eq!(lcs(0x00, 0x00), 0x00);
    assert_eq!(lcs(0x01, 0x00), 0xff);

    assert_eq!(dcs(&[0x07, 0x05]), 0xf4);
    assert_eq!(dcs(&[]), 0x00);
}
