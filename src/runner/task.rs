//! Build tasks and invocation descriptors

use crate::error::Result;

use super::process::ProcessRunner;

/// Opaque descriptor of one external-tool invocation
///
/// The core never builds tool-specific argument vectors itself; it only
/// carries the program name and the ordered arguments a collaborator
/// assembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Create an invocation of `program` with no arguments yet
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name as given, unresolved
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Ordered argument list
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.program, self.args.join(", "))
    }
}

/// A named unit of build work yielding an integer result code
///
/// Either an external-tool invocation or an arbitrary function; the
/// runner never inspects which variant it holds.
pub struct Task {
    caption: String,
    kind: TaskKind,
}

enum TaskKind {
    Process(Invocation),
    Function(Box<dyn FnOnce() -> i32 + Send + 'static>),
}

impl Task {
    /// A process-invocation task with an explicit caption
    pub fn process(caption: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            caption: caption.into(),
            kind: TaskKind::Process(invocation),
        }
    }

    /// A process-invocation task captioned by the invocation itself
    pub fn invocation(invocation: Invocation) -> Self {
        Self {
            caption: invocation.to_string(),
            kind: TaskKind::Process(invocation),
        }
    }

    /// A function task: any callable returning a result code (0 = success)
    pub fn function(caption: impl Into<String>, f: impl FnOnce() -> i32 + Send + 'static) -> Self {
        Self {
            caption: caption.into(),
            kind: TaskKind::Function(Box::new(f)),
        }
    }

    /// Caption used in the runner's begin/done log lines
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Execute to completion, consuming the task
    pub(crate) async fn execute(self, process: &dyn ProcessRunner) -> Result<i32> {
        match self.kind {
            TaskKind::Process(invocation) => {
                let output = process.run(&invocation).await?;
                Ok(output.code)
            }
            TaskKind::Function(f) => {
                // The callable may block; keep it off the async workers
                let code = tokio::task::spawn_blocking(f)
                    .await
                    .map_err(|e| std::io::Error::other(e.to_string()))?;
                Ok(code)
            }
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match &self.kind {
            TaskKind::Process(invocation) => format!("Process({invocation})"),
            TaskKind::Function(_) => "Function".to_string(),
        };
        f.debug_struct("Task")
            .field("caption", &self.caption)
            .field("kind", &variant)
            .finish()
    }
}
