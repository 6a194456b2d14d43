/// A 24-bit color, stored in BMP channel order (blue, green, red).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    b: u8,
    g: u8,
    r: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Build a color from red, green and blue channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// Build a color from channel values in BMP byte order.
    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    pub const fn r(self) -> u8 {
        self.r
    }

    pub const fn g(self) -> u8 {
        self.g
    }

    pub const fn b(self) -> u8 {
        self.b
    }

    /// The three bytes this color occupies in a BMP pixel row.
    pub const fn to_bgr_bytes(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Color {
    fn from(px: rgb::RGB8) -> Self {
        Color::rgb(px.r, px.g, px.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::RGB8 {
    fn from(c: Color) -> Self {
        rgb::RGB8 {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGR8> for Color {
    fn from(px: rgb::alt::BGR8) -> Self {
        Color::bgr(px.b, px.g, px.r)
    }
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::alt::BGR8 {
    fn from(c: Color) -> Self {
        rgb::alt::BGR8 {
            b: c.b,
            g: c.g,
            r: c.r,
        }
    }
}

/// A pixel coordinate. `(0, 0)` is the top-left pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Image size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count.
    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub const fn contains(self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }
}
