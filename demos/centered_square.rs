//! Draws a square in the middle of a solid background and writes it as a BMP.
//!
//! Usage: cargo run --example centered_square [output.bmp]

use zenbmp24::{BitmapError, Color, EncodeRequest, PixelBuffer};

struct Scene {
    width: u32,
    height: u32,
    background: Color,
    square: Color,
    square_side: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1400,
            background: Color::bgr(255, 0, 255),
            square: Color::bgr(0, 255, 0),
            square_side: 2000 / 4,
        }
    }
}

impl Scene {
    fn render(&self) -> Result<PixelBuffer, BitmapError> {
        let mut img = PixelBuffer::new(self.width, self.height)?;
        img.fill(self.background);
        img.draw_centered_rect(self.square_side, self.square)?;
        Ok(img)
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "MyFirstBMP.bmp".into());

    let result = Scene::default()
        .render()
        .and_then(|img| EncodeRequest::new().write_file(&img, &path));
    match result {
        Ok(written) => println!("File size: {written}"),
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(1);
        }
    }
}
