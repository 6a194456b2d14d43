#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp24::*;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Keep allocations small; the header arithmetic is covered separately below.
    let width = u32::from(data[0]) % 97;
    let height = u32::from(data[1]) % 61;
    let Ok(mut img) = PixelBuffer::new(width, height) else {
        return;
    };
    img.fill(Color::bgr(data[2], data[3], 0));

    // Remaining bytes drive drawing: x, y, side, color
    for op in data[4..].chunks_exact(4) {
        let origin = Point::new(u32::from(op[0]), u32::from(op[1]));
        let color = Color::rgb(op[3], op[2], op[0]);
        if op[3] & 1 == 0 {
            img.draw_rect(origin, u32::from(op[2]), color);
        } else {
            let _ = img.draw_centered_rect(u32::from(op[2]), color);
        }
    }

    let order = if data[3] & 1 == 0 {
        RowOrder::TopDown
    } else {
        RowOrder::BottomUp
    };
    let bytes = EncodeRequest::new()
        .with_row_order(order)
        .encode(&img)
        .expect("small images always encode");

    let headers = BmpHeaders::new(width, height).unwrap();
    assert_eq!(bytes.len() as u32, headers.file_size());
    assert_eq!(&bytes[..54], &headers.to_bytes());
    assert_eq!(headers.row_stride() % 4, 0);

    let stride = headers.row_stride() as usize;
    for (i, row) in bytes[54..].chunks_exact(stride.max(1)).enumerate() {
        let y = match order {
            RowOrder::TopDown => i as u32,
            _ => height - 1 - i as u32,
        };
        let stored = img.row(y).unwrap();
        for (x, px) in stored.iter().enumerate() {
            assert_eq!(&row[x * 3..x * 3 + 3], &px.to_bgr_bytes());
        }
        assert!(row[width as usize * 3..].iter().all(|&b| b == 0));
    }

    // Header arithmetic on arbitrary dimensions must never panic.
    let w = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let h = u32::from_le_bytes([data[3], data[2], data[1], data[0]]);
    if let Ok(headers) = BmpHeaders::new(w, h) {
        let expected = 54 + u64::from(h) * u64::from(headers.row_stride());
        assert_eq!(u64::from(headers.file_size()), expected);
    }
});
