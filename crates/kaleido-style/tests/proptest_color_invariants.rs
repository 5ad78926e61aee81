//! Property-based invariant tests for color parsing and neutrals.
//!
//! 1. Canonical output is always `#` plus six lowercase hex digits
//! 2. Input case never changes the parsed value
//! 3. The computed-style `rgb(r, g, b)` spelling agrees with hex
//! 4. Shorthand hex equals the long form with doubled nibbles
//! 5. Arbitrary strings never panic the parser
//! 6. Base in one mode is accent in the other

use kaleido_style::{Mode, Neutral, Rgb};
use proptest::prelude::*;

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    any::<[u8; 3]>().prop_map(Rgb::from)
}

proptest! {
    #[test]
    fn canonical_form_is_lowercase_hex(c in rgb_strategy()) {
        let s = c.to_hex();
        prop_assert_eq!(s.len(), 7);
        prop_assert!(s.starts_with('#'));
        prop_assert!(s[1..].chars().all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch)));
    }
}

proptest! {
    #[test]
    fn case_insensitive_input(c in rgb_strategy()) {
        let upper = c.to_hex().to_ascii_uppercase();
        prop_assert_eq!(Rgb::parse(&upper), Ok(c));
    }
}

proptest! {
    #[test]
    fn css_rgb_agrees_with_hex(c in rgb_strategy()) {
        let css = format!("rgb({}, {}, {})", c.r, c.g, c.b);
        prop_assert_eq!(Rgb::parse(&css), Ok(c));
    }
}

proptest! {
    #[test]
    fn shorthand_doubles_each_nibble(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
        let short = format!("#{r:x}{g:x}{b:x}");
        let long = format!("#{r:x}{r:x}{g:x}{g:x}{b:x}{b:x}");
        prop_assert_eq!(Rgb::parse(&short), Rgb::parse(&long));
    }
}

proptest! {
    #[test]
    fn parser_never_panics(s in ".{0,24}") {
        let _ = Rgb::parse(&s);
    }
}

proptest! {
    #[test]
    fn neutral_values_swap_with_mode(dark in any::<bool>()) {
        let mode = if dark { Mode::Dark } else { Mode::Light };
        prop_assert_eq!(
            Neutral::Base.resolve(mode),
            Neutral::Accent.resolve(mode.toggled())
        );
        prop_assert_ne!(Neutral::Base.resolve(mode), Neutral::Accent.resolve(mode));
    }
}
