//! Client configuration.

/// Describes a policy for handling server redirects.
///
/// The default is to follow redirects up to a limit of 10.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirectPolicy {
    /// Do not apply any special treatment to redirect responses. The response
    /// will be returned as-is and redirects will not be followed.
    None,

    /// Follow all redirects automatically.
    Follow,

    /// Follow redirects automatically up to a maximum number of redirects.
    Limit(u32),
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        RedirectPolicy::Limit(10)
    }
}

impl RedirectPolicy {
    pub(crate) fn apply<H: curl::easy::Handler>(
        &self,
        easy: &mut curl::easy::Easy2<H>,
    ) -> Result<(), curl::Error> {
        match self {
            RedirectPolicy::None => {
                easy.follow_location(false)?;
            }
            RedirectPolicy::Follow => {
                easy.follow_location(true)?;
            }
            RedirectPolicy::Limit(max) => {
                easy.follow_location(true)?;
                easy.max_redirections(*max)?;
            }
        }

        Ok(())
    }
}
