//! Markup Writer
//!
//! Streams indented project markup. Elements are opened through
//! [`MarkupWriter::open_element`], which hands back an [`ElementScope`];
//! the element is closed when the scope is closed or dropped, so nesting
//! stays balanced on every exit path.

use crate::domain::markup::{Attribute, ElementKind};
use std::io::{Result, Write};
use std::ops::{Deref, DerefMut};

pub struct MarkupWriter<W: Write> {
    out: W,
    depth: usize,
    indent_unit: String,
}

impl<W: Write> MarkupWriter<W> {
    /// Writer indenting two spaces per level.
    pub fn new(out: W) -> Self {
        Self::with_indent(out, "  ")
    }

    pub fn with_indent(out: W, indent_unit: impl Into<String>) -> Self {
        Self {
            out,
            depth: 0,
            indent_unit: indent_unit.into(),
        }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }

    /// Write the opening tag and its attribute lines, then nest one level.
    pub fn open_element(
        &mut self,
        kind: ElementKind,
        attributes: &[Attribute<'_>],
    ) -> Result<ElementScope<'_, W>> {
        self.write_line(0, format_args!("<{}", kind))?;
        for (key, value) in attributes {
            self.write_line(1, format_args!("{}=\"{}\"", key, value))?;
        }
        self.write_line(1, format_args!(">"))?;
        self.depth += 1;
        tracing::trace!(element = %kind, depth = self.depth, "opened element");

        Ok(ElementScope {
            writer: self,
            kind,
            closed: false,
        })
    }

    /// Open and immediately close an element with no body.
    pub fn emit_leaf(&mut self, kind: ElementKind, attributes: &[Attribute<'_>]) -> Result<()> {
        self.open_element(kind, attributes)?.close()
    }

    fn end_element(&mut self, kind: ElementKind) -> Result<()> {
        // Depth is restored before writing so a failed write cannot skew it.
        self.depth = self.depth.saturating_sub(1);
        tracing::trace!(element = %kind, depth = self.depth, "closed element");
        self.write_line(0, format_args!("</{}>", kind))
    }

    /// Write one line indented by the current depth plus `extra` levels.
    fn write_line(&mut self, extra: usize, line: std::fmt::Arguments<'_>) -> Result<()> {
        for _ in 0..self.depth + extra {
            self.out.write_all(self.indent_unit.as_bytes())?;
        }
        self.out.write_fmt(line)?;
        self.out.write_all(b"\n")
    }
}

/// An open element. Derefs to the writer so children are written through it.
pub struct ElementScope<'w, W: Write> {
    writer: &'w mut MarkupWriter<W>,
    kind: ElementKind,
    closed: bool,
}

impl<W: Write> ElementScope<'_, W> {
    /// Close the element, reporting write failures.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.writer.end_element(self.kind)
    }
}

impl<W: Write> Deref for ElementScope<'_, W> {
    type Target = MarkupWriter<W>;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl<W: Write> DerefMut for ElementScope<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl<W: Write> Drop for ElementScope<'_, W> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.writer.end_element(self.kind) {
            tracing::warn!(element = %self.kind, error = %e, "failed to write closing tag");
        }
    }
}
