use std::sync::Arc;

/// An error that can occur in rowgate.
///
/// The error is one machine word and carries an optional cause chain. Context
/// is added with [`Error::context`] and displayed in reverse order: the most
/// recently added context first, ending with the root cause.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Invalid or missing primary-key spec, unknown factory tag, or any other
    /// table configuration problem.
    Configuration(String),

    /// Table or column introspection failure.
    Schema(String),

    /// Primary-key argument count mismatch in `find`.
    KeyArity(String),

    /// Failure surfaced by the SQL execution collaborator.
    Execution(String),

    /// Invalid data payload handed to insert/update/create_row.
    Argument(String),

    /// Bridge for foreign errors.
    Anyhow(anyhow::Error),

    Unknown,
}

macro_rules! constructors {
    ( $( $(#[$attr:meta])* $name:ident, $is:ident => $kind:ident; )* ) => {
        impl Error {
            $(
                $(#[$attr])*
                pub fn $name(msg: impl Into<String>) -> Error {
                    Error::from(ErrorKind::$kind(msg.into()))
                }

                pub fn $is(&self) -> bool {
                    matches!(self.kind(), ErrorKind::$kind(_))
                }
            )*
        }
    };
}

constructors! {
    /// Creates a configuration error.
    configuration, is_configuration => Configuration;
    /// Creates a schema introspection error.
    schema, is_schema => Schema;
    /// Creates a primary-key arity error.
    key_arity, is_key_arity => KeyArity;
    /// Creates an execution error.
    execution, is_execution => Execution;
    /// Creates an invalid-argument error.
    argument, is_argument => Argument;
}

impl Error {
    /// Adds context to this error.
    ///
    /// `self` becomes the cause of `consequent`.
    #[inline(always)]
    pub fn context(self, consequent: Error) -> Error {
        self.context_impl(consequent)
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    /// The error at the end of the cause chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            Schema(msg) => write!(f, "schema introspection failed: {msg}"),
            KeyArity(msg) => write!(f, "primary key arity mismatch: {msg}"),
            Execution(msg) => write!(f, "execution failed: {msg}"),
            Argument(msg) => write!(f, "invalid argument: {msg}"),
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown rowgate error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
