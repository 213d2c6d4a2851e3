//! Общие помощники для unit-тестов.

use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing_subscriber::fmt::MakeWriter;

/// Буферный writer для перехвата вывода fmt-слоя.
#[derive(Clone, Default)]
pub(crate) struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

impl VecMakeWriter {
    /// Накопленный вывод в виде строки.
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl<'a> MakeWriter<'a> for VecMakeWriter {
    type Writer = VecWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        VecWriterGuard(self.0.clone())
    }
}

pub(crate) struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

impl io::Write for VecWriterGuard {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
