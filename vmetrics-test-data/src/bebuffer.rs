//! small utilities for assembling table data

use write_fonts::types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Write raw bytes into the buffer
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<BeBuffer> for Vec<u8> {
    fn from(value: BeBuffer) -> Self {
        value.data
    }
}

/// Build a [`BeBuffer`] from a list of scalars of mixed types.
#[macro_export]
macro_rules! be_buffer {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::bebuffer::BeBuffer::new()
            $( .push($item) )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_scalars() {
        let buf = be_buffer! { 1_u16, -2_i16, 0x0102_0304_u32 };
        assert_eq!(buf.as_slice(), &[0, 1, 0xFF, 0xFE, 1, 2, 3, 4]);
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn extend() {
        let buf = BeBuffer::new().extend([5_u16, 6]).extend_bytes(b"ab");
        assert_eq!(&*buf, &[0, 5, 0, 6, b'a', b'b']);
    }
}
