//! Interpreter selection
//!
//! Each script is routed to an interpreter by the declared environment or
//! the file extension, in that order. Scripts matching neither fall back to
//! Python, which is recorded distinctly in the execution log.

/// Supported script interpreters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Python,
    R,
    Node,
}

/// Routing outcome for one script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub interpreter: Interpreter,
    /// True when neither environment nor extension matched
    pub defaulted: bool,
}

impl Selection {
    /// Execution-log line for a successfully executed script
    pub fn executed_line(&self, filename: &str) -> String {
        if self.defaulted {
            return format!("Executed script as Python: {}", filename);
        }
        match self.interpreter {
            Interpreter::Python => format!("Executed Python script: {}", filename),
            Interpreter::R => format!("Executed R script: {}", filename),
            Interpreter::Node => format!("Executed Node.js script: {}", filename),
        }
    }
}

/// Route a script to an interpreter
pub fn select(environment: &str, filename: &str) -> Selection {
    if environment == "python" || filename.ends_with(".py") {
        Selection {
            interpreter: Interpreter::Python,
            defaulted: false,
        }
    } else if environment == "r" || filename.ends_with(".R") {
        Selection {
            interpreter: Interpreter::R,
            defaulted: false,
        }
    } else if environment == "node" || filename.ends_with(".js") {
        Selection {
            interpreter: Interpreter::Node,
            defaulted: false,
        }
    } else {
        Selection {
            interpreter: Interpreter::Python,
            defaulted: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_wins_over_extension() {
        let selection = select("python", "script.R");
        assert_eq!(selection.interpreter, Interpreter::Python);
        assert!(!selection.defaulted);
    }

    #[test]
    fn test_extension_routes_when_environment_differs() {
        let selection = select("r", "script.js");
        assert_eq!(selection.interpreter, Interpreter::R);

        let selection = select("weird", "script.R");
        assert_eq!(selection.interpreter, Interpreter::R);

        let selection = select("weird", "script.js");
        assert_eq!(selection.interpreter, Interpreter::Node);
    }

    #[test]
    fn test_unmatched_defaults_to_python() {
        let selection = select("weird", "script.sh");
        assert_eq!(selection.interpreter, Interpreter::Python);
        assert!(selection.defaulted);
        assert_eq!(
            selection.executed_line("script.sh"),
            "Executed script as Python: script.sh"
        );
    }

    #[test]
    fn test_executed_lines() {
        assert_eq!(
            select("python", "a.py").executed_line("a.py"),
            "Executed Python script: a.py"
        );
        assert_eq!(
            select("r", "a.R").executed_line("a.R"),
            "Executed R script: a.R"
        );
        assert_eq!(
            select("node", "a.js").executed_line("a.js"),
            "Executed Node.js script: a.js"
        );
    }
}
