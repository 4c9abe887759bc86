//! Display helpers shared by the web app and the website builder
//!
//! Everything here is a pure function of its input: the same user always
//! gets the same initials, display name and avatar colour on both surfaces.

pub mod color;
pub mod company;
pub mod text;

pub use color::{color_pair, ColorPair, AVATAR_COLOR_PAIRS, COMPANY_COLOR_PAIRS};
pub use company::{company_type_label, Company, CompanyType};
pub use text::{avatar_color, first_initial, user_display_name, user_initials};

/// Hash a string the way the JavaScript surfaces do
/// (`hash = code + ((hash << 5) - hash)` over UTF-16 code units).
///
/// The shift wraps to 32 bits but the subtraction does not, so the running
/// value is kept in an `i64`.
pub(crate) fn string_hash(s: &str) -> i64 {
    s.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        unit as i64 + (shifted - hash)
    })
}
