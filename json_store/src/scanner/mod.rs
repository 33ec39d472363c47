//! Single pass navigation of raw JSON text.
//!
//! [`decode`] walks the document once, left to right, and stops as soon as
//! the addressed value is known. Values off the path are stepped over by
//! bracket counting and never interpreted.
pub mod constants;
mod lexer;
pub mod path;
mod stream;

use std::ops::ControlFlow;

use lexer::{Lexer, Token};
pub use path::Path;

use crate::JsonKind;

/// A span of the document together with the kind of value it holds.
///
/// Containers span their brackets, strings span the text between their
/// quotes, other literals span exactly the literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub kind: JsonKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<'a> {
    Value(Fragment<'a>),
    Elements(Vec<Fragment<'a>>),
    Entries(Vec<(&'a str, Fragment<'a>)>),
}

/// Locates the value addressed by `path` in `text`, or harvests every child
/// of it when the path asks for that. `None` when the path does not resolve.
pub fn decode<'a>(text: &'a str, path: &Path) -> Option<Decoded<'a>> {
    Navigator::new(text, path).run()
}

type Flow<'a> = ControlFlow<Option<Decoded<'a>>>;

/// Where an object frame is within its current member.
#[derive(Debug, Clone, Copy)]
enum Member<'a> {
    Key,
    Colon(&'a str),
    Value(&'a str),
}

/// One container on the way to the addressed value.
enum Frame<'a> {
    SeekKey {
        member: Member<'a>,
    },
    SeekIndex {
        index: usize,
        target: usize,
    },
    HarvestElements {
        items: Vec<Fragment<'a>>,
    },
    HarvestEntries {
        member: Member<'a>,
        items: Vec<(&'a str, Fragment<'a>)>,
    },
}

impl<'a> Frame<'a> {
    fn kind(&self) -> JsonKind {
        match self {
            Frame::SeekKey { .. } | Frame::HarvestEntries { .. } => JsonKind::Object,
            Frame::SeekIndex { .. } | Frame::HarvestElements { .. } => JsonKind::Array,
        }
    }

    fn member_mut(&mut self) -> Option<&mut Member<'a>> {
        match self {
            Frame::SeekKey { member } | Frame::HarvestEntries { member, .. } => Some(member),
            _ => None,
        }
    }
}

/// What the next value in the current frame is for.
#[derive(Debug, Clone, Copy)]
enum Role<'a> {
    Skip,
    Select,
    Element,
    Entry(&'a str),
}

/// A value as it first shows up in the token stream.
enum Start<'a> {
    Literal(Fragment<'a>),
    Open(JsonKind, usize),
}

/// A container being copied (or stepped over) by depth counting.
struct Capture<'a> {
    start: usize,
    depth: usize,
    kind: JsonKind,
    role: Role<'a>,
}

struct Navigator<'a, 'p> {
    text: &'a str,
    path: &'p Path<'p>,
    stack: Vec<Frame<'a>>,
    capture: Option<Capture<'a>>,
}

impl<'a, 'p> Navigator<'a, 'p> {
    fn new(text: &'a str, path: &'p Path<'p>) -> Self {
        Navigator {
            text,
            path,
            stack: Vec::with_capacity(path.len() + 1),
            capture: None,
        }
    }

    fn run(mut self) -> Option<Decoded<'a>> {
        for token in Lexer::new(self.text) {
            let flow = if self.capture.is_some() {
                self.on_captured_token(token)
            } else {
                self.on_token(token)
            };
            if let ControlFlow::Break(result) = flow {
                return result;
            }
        }
        log::debug!("reached end of input before {:?} resolved", self.path);
        None
    }

    /// Tokens inside a container that is copied or stepped over as a whole.
    fn on_captured_token(&mut self, token: Token) -> Flow<'a> {
        let Some(capture) = self.capture.as_mut() else {
            return ControlFlow::Continue(());
        };
        match token {
            Token::Open(..) => capture.depth += 1,
            Token::Close(_, end) => {
                capture.depth -= 1;
                if capture.depth == 0 {
                    return self.finish_capture(end);
                }
            }
            Token::Invalid(pos) => {
                log::debug!("invalid input at {} inside a container", pos);
                return ControlFlow::Break(None);
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn on_token(&mut self, token: Token) -> Flow<'a> {
        let text = self.text;
        match token {
            Token::Open(kind, pos) => self.on_value(Start::Open(kind, pos)),
            Token::Close(kind, _) => self.on_close(kind),
            Token::Str(start, end) => {
                if let Some(member) = self.stack.last_mut().and_then(Frame::member_mut) {
                    if let Member::Key = member {
                        *member = Member::Colon(&text[start..end]);
                        return ControlFlow::Continue(());
                    }
                }
                self.on_value(Start::Literal(Fragment {
                    text: &text[start..end],
                    kind: JsonKind::String,
                }))
            }
            Token::Scalar(kind, start, end) => self.on_value(Start::Literal(Fragment {
                text: &text[start..end],
                kind,
            })),
            Token::Colon => match self.stack.last_mut().and_then(Frame::member_mut) {
                Some(member) => match *member {
                    Member::Colon(key) => {
                        *member = Member::Value(key);
                        ControlFlow::Continue(())
                    }
                    _ => {
                        log::debug!("unexpected ':' in object");
                        ControlFlow::Break(None)
                    }
                },
                None => {
                    log::debug!("unexpected ':' outside an object");
                    ControlFlow::Break(None)
                }
            },
            Token::Comma => match self.stack.last_mut() {
                Some(Frame::SeekIndex { index, .. }) => {
                    *index += 1;
                    ControlFlow::Continue(())
                }
                Some(Frame::HarvestElements { .. }) => ControlFlow::Continue(()),
                Some(Frame::SeekKey { member }) | Some(Frame::HarvestEntries { member, .. }) => {
                    *member = Member::Key;
                    ControlFlow::Continue(())
                }
                None => {
                    log::debug!("unexpected ',' at top level");
                    ControlFlow::Break(None)
                }
            },
            Token::Invalid(pos) => {
                log::debug!("invalid input at {}", pos);
                ControlFlow::Break(None)
            }
        }
    }

    fn role(&self) -> Option<Role<'a>> {
        let level = self.stack.len().checked_sub(1);
        match self.stack.last() {
            None => Some(Role::Select),
            Some(Frame::SeekKey {
                member: Member::Value(key),
            }) => {
                let wanted = level.and_then(|l| self.path.segment(l));
                Some(if wanted == Some(*key) {
                    Role::Select
                } else {
                    Role::Skip
                })
            }
            Some(Frame::SeekIndex { index, target }) => Some(if index == target {
                Role::Select
            } else {
                Role::Skip
            }),
            Some(Frame::HarvestElements { .. }) => Some(Role::Element),
            Some(Frame::HarvestEntries {
                member: Member::Value(key),
                ..
            }) => Some(Role::Entry(*key)),
            Some(Frame::SeekKey { .. }) | Some(Frame::HarvestEntries { .. }) => None,
        }
    }

    fn on_value(&mut self, value: Start<'a>) -> Flow<'a> {
        let role = match self.role() {
            Some(role) => role,
            None => {
                log::debug!("found a value where an object key was expected");
                return ControlFlow::Break(None);
            }
        };
        match (role, value) {
            (Role::Select, value) => self.select(value),
            (role, Start::Open(kind, start)) => {
                self.capture = Some(Capture {
                    start,
                    depth: 1,
                    kind,
                    role,
                });
                ControlFlow::Continue(())
            }
            (role, Start::Literal(fragment)) => {
                self.collect(role, fragment);
                ControlFlow::Continue(())
            }
        }
    }

    /// Handles the value the path points at, at the current level.
    fn select(&mut self, value: Start<'a>) -> Flow<'a> {
        let matched = self.stack.len();
        if let Some(segment) = self.path.segment(matched) {
            return match value {
                Start::Open(JsonKind::Array, _) => match segment.parse::<usize>() {
                    Ok(target) => {
                        self.stack.push(Frame::SeekIndex { index: 0, target });
                        ControlFlow::Continue(())
                    }
                    Err(_) => {
                        log::debug!("segment '{}' can not index an array", segment);
                        ControlFlow::Break(None)
                    }
                },
                Start::Open(_, _) => {
                    self.stack.push(Frame::SeekKey {
                        member: Member::Key,
                    });
                    ControlFlow::Continue(())
                }
                Start::Literal(fragment) => {
                    log::debug!(
                        "segment '{}' addresses into a {} value",
                        segment,
                        fragment.kind
                    );
                    ControlFlow::Break(None)
                }
            };
        }

        match value {
            Start::Literal(fragment) if self.path.is_harvest() => {
                log::debug!("can not harvest children of a {} value", fragment.kind);
                ControlFlow::Break(None)
            }
            Start::Literal(fragment) => ControlFlow::Break(Some(Decoded::Value(fragment))),
            Start::Open(JsonKind::Array, _) if self.path.is_harvest() => {
                self.stack.push(Frame::HarvestElements { items: vec![] });
                ControlFlow::Continue(())
            }
            Start::Open(_, _) if self.path.is_harvest() => {
                self.stack.push(Frame::HarvestEntries {
                    member: Member::Key,
                    items: vec![],
                });
                ControlFlow::Continue(())
            }
            Start::Open(kind, start) => {
                self.capture = Some(Capture {
                    start,
                    depth: 1,
                    kind,
                    role: Role::Select,
                });
                ControlFlow::Continue(())
            }
        }
    }

    fn finish_capture(&mut self, end: usize) -> Flow<'a> {
        let Some(capture) = self.capture.take() else {
            return ControlFlow::Continue(());
        };
        let text = self.text;
        let fragment = Fragment {
            text: &text[capture.start..end],
            kind: capture.kind,
        };
        match capture.role {
            Role::Select => ControlFlow::Break(Some(Decoded::Value(fragment))),
            role => {
                self.collect(role, fragment);
                ControlFlow::Continue(())
            }
        }
    }

    fn collect(&mut self, role: Role<'a>, fragment: Fragment<'a>) {
        match (role, self.stack.last_mut()) {
            (Role::Element, Some(Frame::HarvestElements { items })) => items.push(fragment),
            (Role::Entry(key), Some(Frame::HarvestEntries { items, .. })) => {
                items.push((key, fragment))
            }
            _ => {}
        }
    }

    fn on_close(&mut self, kind: JsonKind) -> Flow<'a> {
        let Some(frame) = self.stack.pop() else {
            log::debug!("unbalanced closing {}", kind);
            return ControlFlow::Break(None);
        };
        if frame.kind() != kind {
            log::debug!("{} closed by the bracket of an {}", frame.kind(), kind);
            return ControlFlow::Break(None);
        }
        match frame {
            Frame::SeekKey { .. } => {
                log::debug!(
                    "no key '{}' in object",
                    self.path.segment(self.stack.len()).unwrap_or_default()
                );
                ControlFlow::Break(None)
            }
            Frame::SeekIndex { index, target } => {
                log::debug!("index {} out of range, array ended at {}", target, index);
                ControlFlow::Break(None)
            }
            Frame::HarvestElements { items } => {
                log::trace!("harvested {} array elements", items.len());
                ControlFlow::Break(Some(Decoded::Elements(items)))
            }
            Frame::HarvestEntries { items, .. } => {
                log::trace!("harvested {} object entries", items.len());
                ControlFlow::Break(Some(Decoded::Entries(items)))
            }
        }
    }
}
