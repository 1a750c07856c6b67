//! Compilation of pattern source into a flat element sequence.

use crate::RegexError;

/// Lazy quantifier attached to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Match exactly once
    #[default]
    Once,
    /// `@`: zero or one repetition, fewest first
    ZeroOrOne,
    /// `!`: one or more repetitions, fewest first
    OneOrMore,
}

/// One unit of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Characters matched per repetition; `.` matches any single scalar value
    pub(crate) chars: Vec<char>,
    /// Whether the span this element consumes is the pattern's capture
    pub(crate) capturing: bool,
    /// How often the element may repeat
    pub(crate) repeat: Repeat,
}

/// A compiled pattern: an ordered element sequence, anchored at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) elements: Vec<Element>,
}

impl Pattern {
    /// Compile `source` into an element sequence.
    ///
    /// Pattern strings are computed at runtime (names are built by
    /// concatenation), so compilation happens per match operation, not per
    /// program. A quantifier with nothing before it is dropped silently.
    pub fn compile(source: &str) -> Result<Pattern, RegexError> {
        let mut elements: Vec<Element> = Vec::new();
        let mut run: Vec<char> = Vec::new();
        let mut seen_capture = false;
        let mut chars = source.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '[' | '(' => {
                    flush_run(&mut elements, &mut run);
                    let capturing = ch == '(';
                    if capturing {
                        if seen_capture {
                            return Err(RegexError::MultipleCaptures);
                        }
                        seen_capture = true;
                    }
                    let closer = if capturing { ')' } else { ']' };
                    let mut body = Vec::new();
                    loop {
                        match chars.next() {
                            None => return Err(RegexError::UnterminatedGroup { opener: ch }),
                            Some(c) if c == closer => break,
                            Some('[') | Some('(') => return Err(RegexError::NestedGroup),
                            Some(c) => body.push(c),
                        }
                    }
                    elements.push(Element { chars: body, capturing, repeat: Repeat::Once });
                }
                ']' | ')' => return Err(RegexError::UnmatchedClose { closer: ch }),
                '!' => bind_quantifier(&mut elements, &mut run, Repeat::OneOrMore),
                '@' => bind_quantifier(&mut elements, &mut run, Repeat::ZeroOrOne),
                _ => run.push(ch),
            }
        }

        flush_run(&mut elements, &mut run);
        Ok(Pattern { elements })
    }

    /// The compiled elements, in match order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl Element {
    /// Whether this element records the pattern's capture.
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// This element's quantifier.
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }
}

/// Emit the pending literal run as a single unquantified element.
fn flush_run(elements: &mut Vec<Element>, run: &mut Vec<char>) {
    if !run.is_empty() {
        let chars = std::mem::take(run);
        elements.push(Element { chars, capturing: false, repeat: Repeat::Once });
    }
}

/// Bind a quantifier to whatever precedes it.
///
/// A pending literal run is split: its head is emitted unquantified and only
/// the final character repeats. With no pending run the quantifier rebinds
/// the previous element (last quantifier wins); with nothing before it at
/// all it is dropped.
fn bind_quantifier(elements: &mut Vec<Element>, run: &mut Vec<char>, repeat: Repeat) {
    if let Some(last) = run.pop() {
        flush_run(elements, run);
        elements.push(Element { chars: vec![last], capturing: false, repeat });
    } else if let Some(previous) = elements.last_mut() {
        previous.repeat = repeat;
    }
}
