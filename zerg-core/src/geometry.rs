use rand::Rng;

/// A 2D vector used for positions, velocities and scroll offsets, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector for an angle given in degrees, measured clockwise in screen space.
    pub fn from_degrees(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            x: radians.cos(),
            y: radians.sin(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Vector of length `speed` pointing from `self` towards `target`.
    ///
    /// Coincident points yield a vector along +x, the same as `atan2(0, 0)`.
    pub fn heading_to(&self, target: Vector2D, speed: f64) -> Self {
        let diff = target - *self;
        let angle = diff.y.atan2(diff.x);
        Self {
            x: speed * angle.cos(),
            y: speed * angle.sin(),
        }
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Axis-aligned box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Vector2D) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }

    /// Uniformly random point inside the box.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2D {
        Vector2D::new(
            self.x + rng.gen::<f64>() * self.width,
            self.y + rng.gen::<f64>() * self.height,
        )
    }
}
