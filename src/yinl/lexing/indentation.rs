//! Indentation measurement and unit inference
//!
//! yinl never fixes the width of one nesting step. Instead the unit is inferred per block as the
//! greatest common divisor of the observed non-zero widths, so documents written with two or four
//! spaces per level parse the same way as long as they are consistent.

/// Width of the leading whitespace of `line`, in columns.
///
/// Spaces count one column, tabs count `tab_width` columns. Any other character ends the run.
pub fn measure(line: &str, tab_width: usize) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += tab_width,
            _ => break,
        }
    }
    width
}

/// Remove up to `columns` columns of leading whitespace from `line`.
///
/// A tab that would overshoot the requested width is kept so no content is lost.
pub fn strip_columns(line: &str, columns: usize, tab_width: usize) -> &str {
    let mut consumed = 0;
    for (idx, c) in line.char_indices() {
        let step = match c {
            ' ' => 1,
            '\t' => tab_width,
            _ => return &line[idx..],
        };
        if consumed + step > columns {
            return &line[idx..];
        }
        consumed += step;
        if consumed == columns {
            return &line[idx + c.len_utf8()..];
        }
    }
    ""
}

pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Result of inferring an indentation unit from a set of widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInference {
    pub unit: usize,
    /// Set when the widths are not uniform multiples of their smallest non-zero member
    /// (e.g. {4, 6}), in which case `unit` is the GCD fallback.
    pub ambiguous: bool,
    /// Distinct non-zero widths, sorted.
    pub widths: Vec<usize>,
}

/// Infer the indentation unit for `widths`, using `fallback` when every width is zero.
pub fn infer_unit<I>(widths: I, fallback: usize) -> UnitInference
where
    I: IntoIterator<Item = usize>,
{
    let mut observed: Vec<usize> = widths.into_iter().filter(|w| *w > 0).collect();
    observed.sort_unstable();
    observed.dedup();

    let unit = observed.iter().fold(0, |acc, w| gcd(acc, *w));
    if unit == 0 {
        return UnitInference {
            unit: fallback.max(1),
            ambiguous: false,
            widths: observed,
        };
    }

    let ambiguous = observed.first().is_some_and(|smallest| unit < *smallest);
    UnitInference {
        unit,
        ambiguous,
        widths: observed,
    }
}
