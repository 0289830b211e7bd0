use std::io;

/// Ambient execution services threaded through every `execute` call. For
/// now that is the output sink `print` and `__str__` dispatch write to.
pub struct Context<W: io::Write> {
    output: W,
}

impl<W: io::Write> Context<W> {
    pub fn new(output: W) -> Self {
        Context { output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the context, handing back the sink. Lets callers that
    /// evaluate into a buffer recover what was printed.
    pub fn into_output(self) -> W {
        self.output
    }
}
