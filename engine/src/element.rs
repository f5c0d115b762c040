use core::fmt::{self, Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A fixed-width value that can travel through the engine.
///
/// Elements are copied from the stream into a tile buffer and from the buffer into output
/// memory, and buffers may be touched from two threads, hence the bounds.
pub trait Element: Copy + Default + Send + Sync + 'static {}

impl<T: Copy + Default + Send + Sync + 'static> Element for T {}

/// A two-component numeric pair, laid out as `[re, im]`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    #[must_use]
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: Display> Display for Complex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.re, self.im)
    }
}

impl<T: Debug> Debug for Complex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn pair_layout_is_two_components() {
        assert_eq!(core::mem::size_of::<Complex<f32>>(), 8);
        assert_eq!(core::mem::size_of::<Complex<i16>>(), 4);
    }

    #[test]
    fn display_and_serde() {
        let z = Complex::new(3.0f32, 3.5);
        assert_eq!(format!("{z}"), "(3, 3.5)");

        let json = serde_json::to_string(&Complex::new(-2i16, 7)).unwrap();
        assert_eq!(json, r#"{"re":-2,"im":7}"#);
        let back: Complex<i16> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Complex::new(-2, 7));
    }
}
