//! The diagnostics object controls the output of errors generated
//! by the compiler during name and type analysis. It also tracks the number
//! of errors generated for flow control, and keeps every message
//! in emission order so later phases and test harnesses can inspect them.
//!
//! This implementation is NOT thread-safe.
use asciifile::{MaybeSpanned, Span, Spanned};
use failure::Fail;
use std::{
    cell::{Ref, RefCell},
    collections::HashMap,
};
use termcolor::{Color, ColorSpec, WriteColor};

/// Instead of writing errors generated in the different
/// compiler stages directly to stdout, they are collected in this object.
///
/// This has several advantages:
/// - the output destination can be chosen by the caller.
/// - we have a single source responsible for formatting compiler messages.
pub struct Diagnostics {
    message_count: RefCell<HashMap<MessageLevel, usize>>,
    messages: RefCell<Vec<Message>>,
    writer: RefCell<Box<dyn WriteColor>>,
}

impl Diagnostics {
    pub fn new(writer: Box<dyn WriteColor>) -> Self {
        Self {
            writer: RefCell::new(writer),
            messages: RefCell::new(Vec::new()),
            message_count: RefCell::new(HashMap::new()),
        }
    }

    /// True once an error message was emitted. Stays true.
    pub fn errored(&self) -> bool {
        self.count(MessageLevel::Error) > 0
    }

    pub fn count(&self, level: MessageLevel) -> usize {
        self.message_count
            .borrow()
            .get(&level)
            .cloned()
            .unwrap_or(0)
    }

    /// All messages emitted so far, in emission order.
    pub fn messages(&self) -> Ref<'_, [Message]> {
        Ref::map(self.messages.borrow(), |messages| messages.as_slice())
    }

    /// Generate a message that is printed to the
    /// writer given in the `new` constructor. Most of the time
    /// this will be stderr.
    pub fn emit(&self, level: MessageLevel, kind: MaybeSpanned<Box<dyn Fail>>) {
        let msg = Message { level, kind };

        {
            let mut writer = self.writer.borrow_mut();
            msg.write_colored(&mut **writer);
        }
        self.messages.borrow_mut().push(msg);
        self.increment_level_count(level);
    }

    pub fn error<F: Fail>(&self, spanned: Spanned<F>) {
        self.emit(MessageLevel::Error, box_spanned(spanned))
    }

    pub fn error_without_span<F: Fail>(&self, kind: F) {
        let kind: Box<dyn Fail> = Box::new(kind);
        self.emit(MessageLevel::Error, MaybeSpanned::WithoutSpan(kind))
    }

    fn increment_level_count(&self, level: MessageLevel) {
        let mut message_count = self.message_count.borrow_mut();
        let counter = message_count.entry(level).or_insert(0);
        *counter += 1;
    }
}

fn box_spanned<F: Fail>(spanned: Spanned<F>) -> MaybeSpanned<Box<dyn Fail>> {
    let Spanned { span, data } = spanned;
    let data: Box<dyn Fail> = Box::new(data);
    MaybeSpanned::WithSpan(Spanned::new(span, data))
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MessageLevel {
    Error,
}

impl MessageLevel {
    fn color(self) -> Option<Color> {
        // Don't be confused by the return type. `None` means default color!
        match self {
            MessageLevel::Error => Some(Color::Red),
        }
    }

    fn name(self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
        }
    }
}

#[derive(Debug)]
pub struct Message {
    pub level: MessageLevel,
    pub kind: MaybeSpanned<Box<dyn Fail>>,
}

impl Message {
    pub fn span(&self) -> Option<Span> {
        self.kind.span()
    }

    /// The message's error value, if it is of type `T`.
    pub fn downcast_ref<T: Fail>(&self) -> Option<&T> {
        let kind: &dyn Fail = &**self.kind;
        kind.downcast_ref::<T>()
    }
}

///
/// Calls to functions should pass the raw writer, each function should
/// create its own ColorOutput object that is dropped on return. This
/// gurantees correct coloring in nested calls.
struct ColorOutput<'a> {
    writer: &'a mut dyn WriteColor,
    spec: ColorSpec,
}

impl<'a> ColorOutput<'a> {
    fn new(writer: &'a mut dyn WriteColor) -> Self {
        writer.reset().ok();

        Self {
            writer,
            spec: ColorSpec::new(),
        }
    }

    fn set_color(&mut self, color: Option<Color>) {
        // ignore coloring failures using ok()
        self.spec.set_fg(color);
        self.writer.set_color(&self.spec).ok();
    }

    fn set_bold(&mut self, yes: bool) {
        // ignore coloring failures using ok()
        self.spec.set_bold(yes);
        self.writer.set_color(&self.spec).ok();
    }

    fn writer(&mut self) -> &mut dyn WriteColor {
        self.writer
    }
}

/// reset to no color by default. Otherwise code that
/// is not color aware will print everything in the
/// color last used.
impl<'a> Drop for ColorOutput<'a> {
    fn drop(&mut self) {
        // ignore coloring failures using ok()
        self.writer.reset().ok();
    }
}

const HIGHLIGHT: Option<Color> = Some(Color::Cyan);

impl Message {
    fn write_colored(&self, writer: &mut dyn WriteColor) {
        self.write_colored_header(writer);

        if let Some(span) = self.span() {
            let mut output = ColorOutput::new(writer);
            output.set_color(HIGHLIGHT);
            output.set_bold(true);
            write!(output.writer(), "  --> ").ok();

            output.set_color(None);
            output.set_bold(false);
            writeln!(output.writer(), "{}", span).ok();
        }

        writeln!(writer).ok();
    }

    fn write_colored_header(&self, writer: &mut dyn WriteColor) {
        let mut output = ColorOutput::new(writer);
        output.set_color(self.level.color());
        output.set_bold(true);
        write!(output.writer(), "{}: ", self.level.name()).ok();

        output.set_color(None);
        writeln!(output.writer(), "{}", &**self.kind).ok();
    }
}
