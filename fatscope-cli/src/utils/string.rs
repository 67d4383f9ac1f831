use std::fmt;

/// `1.5 KiB`, plain bytes below 1 KiB.
pub struct ByteSize(pub u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
        let mut val = self.0 as f64;
        let mut idx = 0usize;
        while val >= 1024.0 && idx + 1 < UNITS.len() {
            val /= 1024.0;
            idx += 1;
        }
        if idx == 0 {
            write!(f, "{} {}", Thousands(self.0), UNITS[0])
        } else {
            write!(f, "{:.1} {}", val, UNITS[idx])
        }
    }
}

/// `12 345 678`
pub struct Thousands(pub u64);

impl fmt::Display for Thousands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        for (i, d) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size() {
        assert_eq!(ByteSize(512).to_string(), "512 B");
        assert_eq!(ByteSize(1_536).to_string(), "1.5 KiB");
        assert_eq!(ByteSize(32 * 1024 * 1024).to_string(), "32.0 MiB");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(Thousands(0).to_string(), "0");
        assert_eq!(Thousands(999).to_string(), "999");
        assert_eq!(Thousands(1_000).to_string(), "1 000");
        assert_eq!(Thousands(12_345_678).to_string(), "12 345 678");
    }
}
