// SPDX-License-Identifier: Apache-2.0

/// Shape of a signal: a single vector of `width` bits, or a packed bundle of
/// `words` such vectors when `words` is `Some`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DataType {
    pub words: Option<usize>,
    pub width: usize,
    pub signed: bool,
}

impl DataType {
    /// Returns a signed scalar vector of the given width.
    pub fn signed(width: usize) -> Self {
        DataType {
            words: None,
            width,
            signed: true,
        }
    }

    /// Returns a signed bundle of `words` vectors, each `width` bits wide.
    pub fn signed_array(words: usize, width: usize) -> Self {
        DataType {
            words: Some(words),
            width,
            signed: true,
        }
    }

    /// Returns the total number of bits across all words.
    pub fn bits(&self) -> usize {
        self.words.unwrap_or(1) * self.width
    }

    /// Returns the number of addressable words; a scalar counts as one.
    pub fn word_count(&self) -> usize {
        self.words.unwrap_or(1)
    }

    pub fn is_array(&self) -> bool {
        self.words.is_some()
    }
}

/// Represents the direction (`Input` or `Output`) and data type of a port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IO {
    Input(DataType),
    Output(DataType),
}

impl IO {
    /// Returns the data type of the port.
    pub fn ty(&self) -> &DataType {
        match self {
            IO::Input(ty) => ty,
            IO::Output(ty) => ty,
        }
    }

    /// Returns the width of one word of the port in bits.
    pub fn width(&self) -> usize {
        self.ty().width
    }

    pub fn is_input(&self) -> bool {
        matches!(self, IO::Input(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_of_array_and_scalar() {
        assert_eq!(DataType::signed_array(64, 8).bits(), 512);
        assert_eq!(DataType::signed(14).bits(), 14);
        assert_eq!(DataType::signed(14).word_count(), 1);
    }

    #[test]
    fn io_width_is_word_width() {
        let io = IO::Input(DataType::signed_array(4, 8));
        assert_eq!(io.width(), 8);
        assert!(io.is_input());
        assert!(!IO::Output(DataType::signed(10)).is_input());
    }
}
