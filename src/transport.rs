//! Blocking driver for a single curl transfer.

use crate::{config::RedirectPolicy, handler::Collector, Error, ErrorKind};
use curl::{
    easy::Easy2,
    multi::{Easy2Handle, Multi},
};
use http::Uri;
use std::{
    io::{self, Read},
    time::Duration,
};

/// Upper bound on how long to block waiting for socket activity when curl
/// does not ask for a specific timeout.
const DEFAULT_WAIT: Duration = Duration::from_millis(1000);

/// A single request/response exchange driven on the current thread.
///
/// The transport blocks while waiting for the response head, and afterwards
/// pulls the body from the network lazily as it is read. Closing the
/// transport, explicitly or by dropping it, detaches the curl handle and
/// releases the connection.
pub(crate) struct Transport {
    /// A curl multi handle used to execute the transfer.
    multi: Multi,

    /// The curl easy handle for the transfer. `None` once closed.
    handle: Option<Handle>,

    /// Outcome of the transfer, once curl reports it as finished.
    outcome: Option<Result<(), Error>>,
}

/// Wrapper for the various states of a curl easy handle.
enum Handle {
    /// Attached to the multi handle, transfer in progress.
    Active(Easy2Handle<Collector>),

    /// Detached after the transfer finished; may still hold unread body bytes.
    Finished(Easy2<Collector>),
}

impl Handle {
    fn collector(&mut self) -> &mut Collector {
        match self {
            Handle::Active(handle) => handle.get_mut(),
            Handle::Finished(easy) => easy.get_mut(),
        }
    }
}

impl Transport {
    /// Begin a GET request for the given URI and block until the head of the
    /// final response is available.
    pub(crate) fn execute(
        uri: &Uri,
        redirect_policy: RedirectPolicy,
    ) -> Result<(Self, http::response::Builder), Error> {
        let mut easy = Easy2::new(Collector::default());

        easy.signal(false)?;
        easy.get(true)?;
        easy.url(&uri.to_string())?;
        redirect_policy.apply(&mut easy)?;

        let multi = Multi::new();
        let handle = multi.add2(easy)?;

        let mut transport = Self {
            multi,
            handle: Some(Handle::Active(handle)),
            outcome: None,
        };

        // The head is final once curl starts handing us body bytes, or once
        // the whole transfer is over.
        while transport.outcome.is_none()
            && !transport.collector().map_or(false, |c| c.body_started)
        {
            transport.dispatch()?;
        }

        if let Some(Err(e)) = &transport.outcome {
            return Err(e.clone());
        }

        let collector = match transport.collector() {
            Some(collector) if collector.has_head() => collector,
            _ => {
                return Err(Error::with_context(
                    ErrorKind::ConnectionFailed,
                    "server did not send a response",
                ))
            }
        };

        let builder = collector.response_builder();

        Ok((transport, builder))
    }

    /// Release the curl handle and the connection behind it. Does nothing if
    /// already closed.
    pub(crate) fn close(&mut self) {
        match self.handle.take() {
            Some(Handle::Active(handle)) => {
                if let Err(e) = self.multi.remove2(handle) {
                    tracing::warn!("failed to detach transfer: {}", e);
                }
            }
            Some(Handle::Finished(_)) => {}
            None => return,
        }

        tracing::debug!("transfer closed");
    }

    fn collector(&mut self) -> Option<&mut Collector> {
        self.handle.as_mut().map(Handle::collector)
    }

    /// Perform pending reads and writes, blocking the current thread until
    /// there is activity or the wait times out.
    fn dispatch(&mut self) -> Result<(), Error> {
        let timeout = self.multi.get_timeout()?.unwrap_or(DEFAULT_WAIT);

        self.multi.wait(&mut [], timeout.min(DEFAULT_WAIT))?;

        // If `perform()` returns zero, then the transfer is complete.
        if self.multi.perform()? == 0 {
            self.finish()?;
        }

        Ok(())
    }

    /// Collect the result of a completed transfer and detach its handle.
    fn finish(&mut self) -> Result<(), Error> {
        let handle = match self.handle.take() {
            Some(Handle::Active(handle)) => handle,
            other => {
                self.handle = other;
                return Ok(());
            }
        };

        // The transfer has stopped, but that does not mean it succeeded.
        let mut result = None;

        self.multi.messages(|message| {
            if let Some(r) = message.result_for2(&handle) {
                result = Some(r);
            }
        });

        let easy = self.multi.remove2(handle)?;
        let collector = easy.get_ref();

        self.outcome = Some(match result {
            Some(Err(e)) if collector.body_started => {
                tracing::debug!(
                    "transfer failed after {} bytes of body: {}",
                    collector.bytes_received,
                    e
                );
                Err(Error::from_body_failure(e))
            }
            Some(Err(e)) => {
                tracing::debug!("transfer failed: {}", e);
                Err(e.into())
            }
            _ => {
                tracing::debug!(
                    "transfer complete, {} bytes of body",
                    collector.bytes_received
                );
                Ok(())
            }
        });

        self.handle = Some(Handle::Finished(easy));

        Ok(())
    }
}

impl Read for Transport {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        loop {
            // Copy bytes already buffered before looking at the outcome, so a
            // failed transfer only surfaces after everything received so far.
            match self.collector() {
                Some(collector) if !collector.buffer.is_empty() => {
                    return collector.buffer.read(dst);
                }
                Some(_) => {}
                None => return Ok(0),
            }

            match self.outcome.clone() {
                Some(Ok(())) => return Ok(0),
                Some(Err(e)) => return Err(e.into()),
                None => self.dispatch()?,
            }
        }
    }
}

// The multi handle and the easy handle attached to it are owned together and
// only ever touched through `&mut Transport`, so moving the pair to another
// thread is fine even though curl marks each half as not `Send`.
#[allow(unsafe_code)]
unsafe impl Send for Transport {}

impl Drop for Transport {
    fn drop(&mut self) {
        self.close();
    }
}
