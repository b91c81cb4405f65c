//! Structural SMILES check
//!
//! Verifies that a string is shaped like a SMILES identifier: allowed
//! alphabet, balanced branches, closed bracket atoms and paired ring
//! closures. Chemical validity (valences, aromaticity) is not checked.

/// Structural defect in a SMILES string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmilesError {
    #[error("empty string")]
    Empty,

    #[error("invalid character '{ch}' at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    #[error("branch opened before any atom at position {pos}")]
    LeadingBranch { pos: usize },

    #[error("unmatched ')' at position {pos}")]
    UnbalancedBranch { pos: usize },

    #[error("empty branch at position {pos}")]
    EmptyBranch { pos: usize },

    #[error("{0} unclosed branch(es)")]
    UnclosedBranch(usize),

    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },

    #[error("empty bracket atom at position {pos}")]
    EmptyBracket { pos: usize },

    #[error("invalid ring label at position {pos}")]
    BadRingLabel { pos: usize },

    #[error("ring bond {0} is never closed")]
    UnclosedRing(usize),
}

fn is_bond_or_atom_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '=' | '#' | '$' | ':' | '/' | '\\' | '-' | '.' | '*' | '~')
}

fn is_bracket_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '@' | '+' | '-' | ':' | '*')
}

/// Check that `smiles` is a structurally well-formed SMILES string
///
/// # Errors
/// Returns the first structural defect found
pub fn check_smiles(smiles: &str) -> Result<(), SmilesError> {
    if smiles.is_empty() {
        return Err(SmilesError::Empty);
    }

    let chars: Vec<char> = smiles.chars().collect();
    let mut open_rings = [false; 100];
    let mut depth = 0usize;
    let mut seen_atom = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '[' => {
                let start = i;
                let mut j = i + 1;
                while j < chars.len() && chars[j] != ']' {
                    if chars[j] == '[' || !is_bracket_char(chars[j]) {
                        return Err(SmilesError::InvalidCharacter { ch: chars[j], pos: j });
                    }
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(SmilesError::UnclosedBracket { pos: start });
                }
                if j == start + 1 {
                    return Err(SmilesError::EmptyBracket { pos: start });
                }
                seen_atom = true;
                i = j;
            }
            ']' => return Err(SmilesError::InvalidCharacter { ch, pos: i }),
            '(' => {
                if !seen_atom {
                    return Err(SmilesError::LeadingBranch { pos: i });
                }
                if chars.get(i + 1) == Some(&')') {
                    return Err(SmilesError::EmptyBranch { pos: i });
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(SmilesError::UnbalancedBranch { pos: i });
                }
                depth -= 1;
            }
            '%' => {
                let label = chars
                    .get(i + 1..i + 3)
                    .filter(|d| d.iter().all(char::is_ascii_digit))
                    .map(|d| d.iter().collect::<String>())
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or(SmilesError::BadRingLabel { pos: i })?;
                toggle_ring(&mut open_rings, label, i, seen_atom)?;
                i += 2;
            }
            d if d.is_ascii_digit() => {
                let label = d.to_digit(10).map_or(0, |v| v as usize);
                toggle_ring(&mut open_rings, label, i, seen_atom)?;
            }
            c if is_bond_or_atom_char(c) => {
                if c.is_ascii_alphabetic() || c == '*' {
                    seen_atom = true;
                }
            }
            _ => return Err(SmilesError::InvalidCharacter { ch, pos: i }),
        }
        i += 1;
    }

    if depth > 0 {
        return Err(SmilesError::UnclosedBranch(depth));
    }
    if let Some(ring) = open_rings.iter().position(|open| *open) {
        return Err(SmilesError::UnclosedRing(ring));
    }
    Ok(())
}

fn toggle_ring(
    open_rings: &mut [bool; 100],
    label: usize,
    pos: usize,
    seen_atom: bool,
) -> Result<(), SmilesError> {
    if !seen_atom || label >= open_rings.len() {
        return Err(SmilesError::BadRingLabel { pos });
    }
    open_rings[label] = !open_rings[label];
    Ok(())
}
