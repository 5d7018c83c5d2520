//! Validation helpers for DTOs.

use validator::ValidationError;

/// Maximum length of a business slug.
pub const SLUG_MAX_LEN: usize = 50;
/// Minimum length of a business slug.
pub const SLUG_MIN_LEN: usize = 3;

/// Validates that a slug is 3-50 characters of lowercase letters, digits, and
/// hyphens.
///
/// # Examples
///
/// ```ignore
/// validate_slug("my-cafe")   // Ok
/// validate_slug("My-Cafe")   // Err - uppercase
/// validate_slug("ab")        // Err - too short
/// ```
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.len() < SLUG_MIN_LEN || slug.len() > SLUG_MAX_LEN {
        let mut err = ValidationError::new("slug_length");
        err.message = Some(
            format!(
                "Slug must be {SLUG_MIN_LEN}-{SLUG_MAX_LEN} characters (got {})",
                slug.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        let mut err = ValidationError::new("slug_format");
        err.message =
            Some("Slug may contain only lowercase letters, digits, and hyphens".into());
        return Err(err);
    }

    Ok(())
}

/// Derive a slug from a business display name.
///
/// Lowercases, folds common accented letters to ASCII, strips the rest of the
/// special characters, turns whitespace into hyphens, collapses runs of
/// hyphens, trims, and truncates to [`SLUG_MAX_LEN`]. Idempotent: deriving
/// from an already-derived slug yields the same slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in name.to_lowercase().chars() {
        let folded = fold_accent(c);
        let mapped = match folded {
            'a'..='z' | '0'..='9' => Some(folded),
            '-' => Some('-'),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        };

        match mapped {
            Some('-') => {
                if !last_was_hyphen {
                    slug.push('-');
                    last_was_hyphen = true;
                }
            }
            Some(c) => {
                slug.push(c);
                last_was_hyphen = false;
            }
            None => {}
        }
    }

    slug.truncate(SLUG_MAX_LEN);
    slug.trim_matches('-').to_string()
}

/// Map common Latin accented letters to their ASCII base letter.
fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è'..='ë' | 'ē' | 'ė' | 'ę' => 'e',
        'ì'..='ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' => 'n',
        'ò'..='ö' | 'ø' | 'ō' => 'o',
        'ß' => 's',
        'ù'..='ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}
