// SPDX-License-Identifier: MIT

/// `image[offset .. offset + len]`, cut at the end of the image.
///
/// Offsets come from on-disk geometry and may point anywhere, so the result
/// can be shorter than `len` or empty.
pub fn clamped(image: &[u8], offset: u64, len: u64) -> &[u8] {
    let start = usize::try_from(offset)
        .unwrap_or(usize::MAX)
        .min(image.len());
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(image.len());
    &image[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside() {
        let img = [1u8, 2, 3, 4, 5];
        assert_eq!(clamped(&img, 1, 3), &[2, 3, 4]);
    }

    #[test]
    fn test_cut_at_end() {
        let img = [1u8, 2, 3, 4, 5];
        assert_eq!(clamped(&img, 3, 10), &[4, 5]);
        assert!(clamped(&img, 5, 1).is_empty());
        assert!(clamped(&img, u64::MAX, u64::MAX).is_empty());
    }
}
