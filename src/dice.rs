use crate::error::{Error, Result};

/// We normally handle 6-sided dice.
pub const DICE_SIDES: u32 = 6;

pub fn check_sides(dice_sides: u32) -> Result<()> {
    if dice_sides < 2 {
        return Err(Error::InvalidDiceSides(dice_sides));
    }
    Ok(())
}

/// Digits of `num` in base `base`, most significant first.
///
/// `base10_to_n(5, 2)` gives `[1, 0, 1]`, `base10_to_n(127, 16)` gives
/// `[7, 15]`.
pub fn base10_to_n(num: u64, base: u32) -> Vec<u32> {
    let base = u64::from(base);
    let mut digits = Vec::new();
    let mut curr = num;
    while curr >= base {
        digits.push((curr % base) as u32);
        curr /= base;
    }
    digits.push(curr as u32);
    digits.reverse();
    digits
}

/// Dice faces naming the list item at `item_index`.
///
/// Faces start at 1 and the result is padded with 1s to `dice_num` faces:
/// with 3 six-sided dice index 0 is `1-1-1` and index 5 is `1-1-6`. With
/// fewer than 10 sides an empty separator gives compact output like `212`.
pub fn idx_to_dicenums(item_index: u64, dice_num: u32, dice_sides: u32, separator: &str) -> String {
    let faces: Vec<u32> = base10_to_n(item_index, dice_sides)
        .into_iter()
        .map(|d| d + 1)
        .collect();

    let dice_num = dice_num as usize;
    let mut padded = vec![1u32; dice_num.saturating_sub(faces.len())];
    let skip = faces.len().saturating_sub(dice_num);
    padded.extend_from_slice(&faces[skip..]);

    padded
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Smallest number of dice whose combinations cover `list_len` items.
pub fn dice_needed(list_len: usize, dice_sides: u32) -> u32 {
    if dice_sides < 2 {
        return 1;
    }
    let mut dice = 1u32;
    let mut combinations = u128::from(dice_sides);
    while combinations < list_len as u128 {
        combinations *= u128::from(dice_sides);
        dice += 1;
    }
    dice
}

/// Whether every dice roll maps to exactly one list item.
pub fn is_dice_aligned(list_len: usize, dice_sides: u32) -> bool {
    if list_len == 0 || dice_sides < 2 {
        return false;
    }
    u128::from(dice_sides).pow(dice_needed(list_len, dice_sides)) == list_len as u128
}

pub fn default_separator(dice_sides: u32) -> &'static str {
    if dice_sides < 10 { "" } else { "-" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base10_to_n() {
        assert_eq!(base10_to_n(0, 2), vec![0]);
        assert_eq!(base10_to_n(5, 2), vec![1, 0, 1]);
        assert_eq!(base10_to_n(127, 16), vec![7, 15]);
        assert_eq!(base10_to_n(7775, 6), vec![5, 5, 5, 5, 5]);
    }

    #[test]
    fn test_idx_to_dicenums() {
        assert_eq!(idx_to_dicenums(0, 1, 6, "-"), "1");
        assert_eq!(idx_to_dicenums(5, 1, 6, "-"), "6");
        assert_eq!(idx_to_dicenums(0, 3, 6, "-"), "1-1-1");
        assert_eq!(idx_to_dicenums(5, 3, 6, "-"), "1-1-6");
        assert_eq!(idx_to_dicenums(6, 3, 6, "-"), "1-2-1");
        assert_eq!(idx_to_dicenums(7775, 5, 6, ""), "66666");
    }

    #[test]
    fn test_idx_to_dicenums_coins() {
        assert_eq!(idx_to_dicenums(5, 3, 2, "-"), "2-1-2");
        assert_eq!(idx_to_dicenums(5, 3, 2, ""), "212");
    }

    #[test]
    fn test_idx_to_dicenums_truncates() {
        // 36 needs three six-sided dice; with two only the last two remain.
        assert_eq!(idx_to_dicenums(36, 2, 6, "-"), "1-1");
    }

    #[test]
    fn test_dice_needed() {
        assert_eq!(dice_needed(1, 6), 1);
        assert_eq!(dice_needed(6, 6), 1);
        assert_eq!(dice_needed(7, 6), 2);
        assert_eq!(dice_needed(7776, 6), 5);
        assert_eq!(dice_needed(8192, 6), 6);
        assert_eq!(dice_needed(8192, 2), 13);
    }

    #[test]
    fn test_is_dice_aligned() {
        assert!(is_dice_aligned(7776, 6));
        assert!(is_dice_aligned(8192, 2));
        assert!(!is_dice_aligned(8192, 6));
        assert!(!is_dice_aligned(0, 6));
    }

    #[test]
    fn test_check_sides() {
        assert!(check_sides(2).is_ok());
        assert!(matches!(check_sides(1), Err(Error::InvalidDiceSides(1))));
    }

    #[test]
    fn test_default_separator() {
        assert_eq!(default_separator(6), "");
        assert_eq!(default_separator(20), "-");
    }
}
