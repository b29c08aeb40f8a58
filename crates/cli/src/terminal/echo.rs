//! The resolver's echo output, remembered for the menus.
//!
//! Menus take over the alternate screen, which hides the command line the
//! resolver just echoed. [`ContextEcho`] forwards the echo unchanged and keeps
//! the last complete line so the menu can show it under its header.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Last complete echo line, shared between the writer and the prompt.
pub type EchoContext = Rc<RefCell<Option<String>>>;

pub struct ContextEcho<W: Write> {
    inner: W,
    pending: Vec<u8>,
    context: EchoContext,
}

impl<W: Write> ContextEcho<W> {
    pub fn new(inner: W, context: EchoContext) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            context,
        }
    }
}

impl<W: Write> Write for ContextEcho<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.pending.extend_from_slice(&buf[..written]);

        if let Some(end) = self.pending.iter().rposition(|&byte| byte == b'\n') {
            let complete = String::from_utf8_lossy(&self.pending[..end]).into_owned();
            let line = complete
                .rsplit_once('\n')
                .map_or(complete.as_str(), |(_, line)| line);
            *self.context.borrow_mut() = Some(line.to_string());
            self.pending.drain(..=end);
        }

        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_and_keeps_last_complete_line() {
        let context = EchoContext::default();
        let mut output = Vec::new();
        let mut echo = ContextEcho::new(&mut output, Rc::clone(&context));

        writeln!(echo, "> ops deploy svc1").unwrap();
        assert_eq!(context.borrow().as_deref(), Some("> ops deploy svc1"));

        write!(echo, "> ops deploy ").unwrap();
        write!(echo, "--env prod svc1\n> partial").unwrap();
        assert_eq!(
            context.borrow().as_deref(),
            Some("> ops deploy --env prod svc1")
        );

        drop(echo);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "> ops deploy svc1\n> ops deploy --env prod svc1\n> partial"
        );
    }

    #[test]
    fn test_nothing_remembered_before_first_newline() {
        let context = EchoContext::default();
        let mut echo = ContextEcho::new(io::sink(), Rc::clone(&context));

        write!(echo, "> ops").unwrap();
        assert!(context.borrow().is_none());
    }
}
