//! Anchored matching with lazy backtracking.

use crate::pattern::{Element, Pattern, Repeat};

impl Pattern {
    /// Match this pattern against the whole of `target`.
    ///
    /// On success, returns the capture group's text, or the entire target
    /// when the pattern has no capture group. Returns `None` when the
    /// pattern does not consume `target` exactly.
    pub fn find(&self, target: &str) -> Option<String> {
        let scalars: Vec<char> = target.chars().collect();
        let mut capture: Option<(usize, usize)> = None;
        if match_from(&self.elements, 0, &scalars, 0, &mut capture) {
            Some(match capture {
                Some((start, end)) => scalars[start..end].iter().collect(),
                None => target.to_string(),
            })
        } else {
            None
        }
    }

    /// Run this pattern over `candidates` in order.
    ///
    /// Returns the first successful match value, or the empty string when no
    /// candidate matches.
    pub fn find_first<'a, I>(&self, candidates: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .find_map(|candidate| self.find(candidate))
            .unwrap_or_default()
    }
}

/// Match one repetition of `element` at `pos`, returning the end position.
fn match_unit(element: &Element, target: &[char], pos: usize) -> Option<usize> {
    let end = pos + element.chars.len();
    if end > target.len() {
        return None;
    }
    for (offset, pc) in element.chars.iter().enumerate() {
        if *pc != '.' && *pc != target[pos + offset] {
            return None;
        }
    }
    Some(end)
}

/// Match `elements[index..]` against `target[pos..]`, anchored at the end.
///
/// Quantified elements are lazy: the fewest repetitions are tried first and
/// the count only grows when the rest of the pattern fails on the remainder.
/// Growth stops as soon as the element itself no longer matches, or no
/// longer advances the position.
///
/// The capture span is overwritten on every attempt through the capturing
/// element; whichever attempt completes the match leaves the right span
/// behind, and a failed match discards it wholesale.
fn match_from(
    elements: &[Element],
    index: usize,
    target: &[char],
    pos: usize,
    capture: &mut Option<(usize, usize)>,
) -> bool {
    let Some(element) = elements.get(index) else {
        return pos == target.len();
    };
    match element.repeat {
        Repeat::Once => {
            let Some(end) = match_unit(element, target, pos) else {
                return false;
            };
            if element.capturing {
                *capture = Some((pos, end));
            }
            match_from(elements, index + 1, target, end, capture)
        }
        Repeat::ZeroOrOne => {
            if element.capturing {
                *capture = Some((pos, pos));
            }
            if match_from(elements, index + 1, target, pos, capture) {
                return true;
            }
            let Some(end) = match_unit(element, target, pos) else {
                return false;
            };
            if end == pos {
                // zero-width repetition, already covered by the zero branch
                return false;
            }
            if element.capturing {
                *capture = Some((pos, end));
            }
            match_from(elements, index + 1, target, end, capture)
        }
        Repeat::OneOrMore => {
            let Some(mut end) = match_unit(element, target, pos) else {
                return false;
            };
            loop {
                if element.capturing {
                    *capture = Some((pos, end));
                }
                if match_from(elements, index + 1, target, end, capture) {
                    return true;
                }
                match match_unit(element, target, end) {
                    Some(next) if next > end => end = next,
                    _ => return false,
                }
            }
        }
    }
}
