//! Encode/decode round-trip of a single I-frame.
//!
//! Usage:
//!   cargo run --example basic

use hdlc::Frame;
use hdlc::control::Information;

use pretty_hex::pretty_hex;


fn main() {
    let control = Information::new(0x01, 0x01, 0x02).to_byte();

    let mut frame = Frame::new(0x03, control);
    frame
        .info
        .try_extend_from_slice(&[0x04, 0x05, 0x06, 0x07])
        .expect("info too long");

    let mut buf = [0; 64];
    let len = hdlc::encode(&frame, &mut buf).expect("failed to encode frame");

    let encoded = &buf[..len];
    println!("Encoded frame:");
    println!("{}", pretty_hex(&encoded));

    let decoded = hdlc::decode(encoded).expect("failed to decode frame");

    println!();
    println!("Original frame => {frame:02X?}");
    println!("Decoded frame  => {decoded:02X?}");

    assert_eq!(decoded, frame);
    println!();
    println!("Decoded frame matches original frame");
}
