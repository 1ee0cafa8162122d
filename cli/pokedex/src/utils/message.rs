use std::fmt::Display;

/// Write a message to stderr.
///
/// This is a wrapper around `eprintln!` that can be further extended
/// to include logging, word wrapping, ANSI filtering etc.
fn print_message(v: impl Display) {
    #[cfg(test)]
    {
        let history = crate::utils::message::history::History::global();
        history.push_message(format!("{v}"));
    }

    eprintln!("{v}");
}

/// alias for [print_message]
pub(crate) fn plain(v: impl Display) {
    print_message(v);
}
pub(crate) fn error(v: impl Display) {
    print_message(std::format_args!("❌ ERROR: {v}"));
}
/// double width character, add an additional space for alignment
pub(crate) fn warning(v: impl Display) {
    print_message(std::format_args!("⚠️  {v}"));
}

/// A history for messages printed to stderr through the `message` module.
///
/// In unit tests the messaging functions populate a thread local `History`
/// in addition to printing to stderr, so tests can assert against them.
/// Messages of tasks spawned onto other threads are not captured.
#[cfg(test)]
pub mod history {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    thread_local! {
        static THREAD_HISTORY: Rc<RefCell<VecDeque<String>>> = {
            Rc::new(RefCell::new(VecDeque::new()))
        };
    }

    pub(crate) struct History {
        messages: Rc<RefCell<VecDeque<String>>>,
    }

    impl History {
        pub(crate) fn global() -> History {
            let messages = THREAD_HISTORY.with(|h| h.clone());
            History { messages }
        }

        /// Get a snapshot of the messages at the time of the call,
        /// ordered oldest to newest.
        pub(crate) fn messages(&self) -> VecDeque<String> {
            self.messages.borrow().clone()
        }

        pub(crate) fn push_message(&self, message: String) {
            self.messages.borrow_mut().push_back(message);
        }

        pub(crate) fn clear(&self) {
            self.messages.borrow_mut().clear();
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::message::{error, plain};

        #[test]
        fn records_messages_of_current_thread() {
            let history = History::global();
            history.clear();

            plain("one");
            error("two");
            assert_eq!(&history.messages(), &["one", "❌ ERROR: two"]);

            history.clear();
            assert_eq!(history.messages().len(), 0);
        }

        #[test]
        fn other_threads_are_not_recorded() {
            let history = History::global();
            history.clear();

            std::thread::scope(|scope| {
                scope.spawn(|| plain("elsewhere"));
            });

            assert_eq!(history.messages().len(), 0)
        }
    }
}
