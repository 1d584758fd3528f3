use mnistbin_codec::{
    ByteOrder, LineSource, RecordCodec, TextRecord, IMAGE_COLS, IMAGE_PIXEL_COUNT, IMAGE_ROWS,
    RECORD_STRIDE,
};
use proptest::prelude::*;
use std::io::Cursor;

fn byte_order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![
        Just(ByteOrder::Native),
        Just(ByteOrder::Little),
        Just(ByteOrder::Big),
    ]
}

fn to_text(label: i32, pixels: &[u8]) -> String {
    let mut text = format!("{label}\n");
    for row in pixels.chunks(IMAGE_COLS) {
        let tokens: Vec<String> = row.iter().map(u8::to_string).collect();
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }
    text
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(
        label in any::<i32>(),
        pixels in proptest::collection::vec(any::<u8>(), IMAGE_PIXEL_COUNT),
        order in byte_order(),
    ) {
        let codec = RecordCodec::new(order);
        let record = TextRecord::from_slice(label, &pixels).unwrap();
        let encoded = codec.encode(&record);
        prop_assert_eq!(encoded.as_bytes().len(), RECORD_STRIDE);
        let decoded = codec.decode(encoded.as_bytes()).unwrap();
        prop_assert_eq!(decoded.label(), label);
        prop_assert_eq!(&decoded.pixels()[..], &pixels[..]);
    }

    #[test]
    fn prop_text_records_encode_to_fixed_stride(
        label in any::<i32>(),
        pixels in proptest::collection::vec(any::<u8>(), IMAGE_PIXEL_COUNT),
    ) {
        let codec = RecordCodec::default();
        let mut source = LineSource::new(Cursor::new(to_text(label, &pixels).into_bytes()));
        let encoded = codec.encode_next_record(&mut source).unwrap().unwrap();
        prop_assert_eq!(encoded.len(), RECORD_STRIDE);
        prop_assert_eq!(source.line_number(), 1 + IMAGE_ROWS as u64);

        let decoded = codec.decode_record(&encoded);
        prop_assert_eq!(decoded.label(), label);
        prop_assert_eq!(&decoded.pixels()[..], &pixels[..]);
    }
}

#[test]
fn mixed_row_contributes_only_digit_tokens() {
    let mut text = String::from("5\n12 -3 4a 56");
    for _ in 0..26 {
        text.push(' ');
        text.push('0');
    }
    text.push('\n');
    for _ in 1..IMAGE_ROWS {
        text.push_str(&vec!["0"; IMAGE_COLS].join(" "));
        text.push('\n');
    }

    let mut source = LineSource::new(Cursor::new(text.into_bytes()));
    let record = RecordCodec::default().parse_record(&mut source).unwrap().unwrap();
    assert_eq!(record.label(), 5);
    assert_eq!(&record.pixels()[..3], &[12, 56, 0]);
}

#[test]
fn dropped_tokens_are_not_replaced() {
    let mut text = String::from("5\n12 -3 4a 56");
    for _ in 0..24 {
        text.push_str(" 0");
    }
    text.push('\n');
    for _ in 1..IMAGE_ROWS {
        text.push_str(&vec!["0"; IMAGE_COLS].join(" "));
        text.push('\n');
    }

    let mut source = LineSource::new(Cursor::new(text.into_bytes()));
    let err = RecordCodec::default().parse_record(&mut source).unwrap_err();
    // 2 + 24 + 27 * 28 = 782 survive
    assert!(err.is_count_mismatch());
    assert!(err.to_string().contains("found 782"));
}
