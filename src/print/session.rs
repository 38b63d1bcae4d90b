//! Top-level print/export entry point

use std::cell::RefCell;
use std::rc::Rc;

use super::materialize::{prepare_paginated_print, PrintCleanup};
use crate::dom::{DocumentTree, Markers};
use crate::error::PrintError;

/// Delay between the print call returning and cleanup running
///
/// The platform print call gives no completion signal, so this is a
/// best-effort window for the print snapshot to be taken.
pub const CLEANUP_DELAY_MS: u32 = 150;

/// The platform's print or export action
pub trait PrintTarget {
    fn print(&mut self) -> Result<(), PrintError>;
}

impl<F> PrintTarget for F
where
    F: FnMut() -> Result<(), PrintError>,
{
    fn print(&mut self) -> Result<(), PrintError> {
        self()
    }
}

/// A print that has been triggered and still needs its cleanup run
#[derive(Debug)]
#[must_use = "the cleanup must be scheduled or the print pages stay in the document"]
pub struct PrintJob<N> {
    /// `None` when pagination was inactive and nothing was injected
    pub cleanup: Option<PrintCleanup<N>>,
    pub cleanup_delay_ms: u32,
}

impl<N: Clone + PartialEq + std::fmt::Debug + 'static> PrintJob<N> {
    /// Run the cleanup now
    pub fn finish<T: DocumentTree<Node = N>>(mut self, tree: &mut T) {
        if let Some(cleanup) = self.cleanup.as_mut() {
            cleanup.restore(tree);
        }
    }

    /// Hand the cleanup to a deferred runner such as a browser timer
    ///
    /// `schedule` receives the cleanup callback and the delay in milliseconds.
    /// The callback restores through a clone of `tree`, so `T` should be a
    /// handle onto a shared document. If scheduling fails the cleanup runs
    /// against `tree` immediately and the error is returned.
    pub fn schedule<T, S, E>(self, tree: &mut T, schedule: S) -> Result<(), E>
    where
        T: DocumentTree<Node = N> + Clone + 'static,
        S: FnOnce(Box<dyn FnOnce()>, u32) -> Result<(), E>,
    {
        let delay = self.cleanup_delay_ms;
        let Some(cleanup) = self.cleanup else {
            return Ok(());
        };

        let cleanup = Rc::new(RefCell::new(cleanup));
        let deferred = Rc::clone(&cleanup);
        let mut deferred_tree = tree.clone();
        let run: Box<dyn FnOnce()> =
            Box::new(move || deferred.borrow_mut().restore(&mut deferred_tree));

        if let Err(err) = schedule(run, delay) {
            let mut cleanup = cleanup.borrow_mut();
            tracing::warn!(
                session = cleanup.session(),
                "could not schedule print cleanup, restoring now"
            );
            cleanup.restore(tree);
            return Err(err);
        }
        Ok(())
    }
}

/// Materialize print pages for `root` and trigger `target`
///
/// Fails before touching the document when `root` is missing or detached.
/// If the print action fails the injected pages are removed before the error
/// is returned.
pub fn print_paginated<T, P>(
    tree: &mut T,
    root: Option<&T::Node>,
    markers: &Markers,
    target: &mut P,
) -> Result<PrintJob<T::Node>, PrintError>
where
    T: DocumentTree,
    P: PrintTarget + ?Sized,
{
    let root = root.ok_or(PrintError::RootMissing)?;
    if !tree.is_connected(root) {
        return Err(PrintError::RootDetached);
    }

    let mut cleanup = prepare_paginated_print(tree, root, markers)?;

    if let Err(err) = target.print() {
        tracing::warn!(error = %err, "print action failed, restoring document");
        if let Some(cleanup) = cleanup.as_mut() {
            cleanup.restore(tree);
        }
        return Err(err);
    }

    Ok(PrintJob {
        cleanup,
        cleanup_delay_ms: CLEANUP_DELAY_MS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, NodeId};
    use crate::geometry::{LayoutConfig, LayoutVariables};

    fn paginated_editor(doc: &mut MemoryDocument, markers: &Markers) -> NodeId {
        let root = doc.create_in_body("div");
        let content = doc.create_child(root, "div");
        doc.with_class(content, &markers.content_root);
        LayoutVariables::project(&LayoutConfig::default().resolve())
            .publish(doc, &root, markers)
            .unwrap();
        for _ in 0..20 {
            doc.create_block(content, "p", 120.0);
        }
        root
    }

    #[test]
    fn test_missing_root() {
        let mut doc = MemoryDocument::new();
        let mut target = || -> Result<(), PrintError> { panic!("must not print") };
        let err = print_paginated(&mut doc, None, &Markers::default(), &mut target).unwrap_err();
        assert!(matches!(err, PrintError::RootMissing));
    }

    #[test]
    fn test_detached_root_fails_without_side_effects() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let root = paginated_editor(&mut doc, &markers);
        doc.remove(&root).unwrap();
        let before = doc.connected_count();

        let mut printed = false;
        let mut target = || -> Result<(), PrintError> {
            printed = true;
            Ok(())
        };
        let err = print_paginated(&mut doc, Some(&root), &markers, &mut target).unwrap_err();
        assert!(matches!(err, PrintError::RootDetached));
        assert!(!printed);
        assert_eq!(doc.connected_count(), before);
        assert_eq!(doc.children(&root).len(), 1);
    }

    #[test]
    fn test_print_then_finish() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let root = paginated_editor(&mut doc, &markers);
        let before = doc.connected_count();

        let mut calls = 0;
        let mut target = || -> Result<(), PrintError> {
            calls += 1;
            Ok(())
        };
        let job = print_paginated(&mut doc, Some(&root), &markers, &mut target).unwrap();
        assert_eq!(calls, 1);
        assert_eq!(job.cleanup_delay_ms, CLEANUP_DELAY_MS);
        // 784px budget, 120px blocks: 6 per page
        assert_eq!(job.cleanup.as_ref().map(|c| c.page_count()), Some(4));
        assert!(doc.connected_count() > before);

        job.finish(&mut doc);
        assert_eq!(doc.connected_count(), before);
    }

    #[test]
    fn test_inactive_pagination_still_prints() {
        let mut doc = MemoryDocument::new();
        let root = doc.create_in_body("div");
        let mut calls = 0;
        let mut target = || -> Result<(), PrintError> {
            calls += 1;
            Ok(())
        };
        let job = print_paginated(&mut doc, Some(&root), &Markers::default(), &mut target).unwrap();
        assert!(job.cleanup.is_none());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failed_print_restores_document() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let root = paginated_editor(&mut doc, &markers);
        let before = doc.connected_count();

        let mut target =
            || -> Result<(), PrintError> { Err(PrintError::PrintFailed("dialog blocked".to_string())) };
        let err = print_paginated(&mut doc, Some(&root), &markers, &mut target).unwrap_err();
        assert!(matches!(err, PrintError::PrintFailed(_)));
        assert_eq!(doc.connected_count(), before);
    }

    #[test]
    fn test_schedule_defers_cleanup() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let root = paginated_editor(&mut doc, &markers);
        let before = doc.connected_count();

        let mut target = || -> Result<(), PrintError> { Ok(()) };
        let job = print_paginated(&mut doc, Some(&root), &markers, &mut target).unwrap();

        let mut pending = None;
        job.schedule(&mut doc, |run, delay| -> Result<(), ()> {
            assert_eq!(delay, CLEANUP_DELAY_MS);
            pending = Some(run);
            Ok(())
        })
        .unwrap();

        assert!(doc.connected_count() > before);
        let run = pending.unwrap();
        run();
    }

    #[test]
    fn test_failed_schedule_restores_immediately() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let root = paginated_editor(&mut doc, &markers);
        let before = doc.connected_count();

        let mut target = || -> Result<(), PrintError> { Ok(()) };
        let job = print_paginated(&mut doc, Some(&root), &markers, &mut target).unwrap();
        assert!(doc.connected_count() > before);

        let err = job
            .schedule(&mut doc, |_run, _delay| Err("timer unavailable"))
            .unwrap_err();
        assert_eq!(err, "timer unavailable");
        assert_eq!(doc.connected_count(), before);
    }

    #[test]
    fn test_schedule_without_cleanup_is_noop() {
        let mut doc = MemoryDocument::new();
        let root = doc.create_in_body("div");
        let mut target = || -> Result<(), PrintError> { Ok(()) };
        let job = print_paginated(&mut doc, Some(&root), &Markers::default(), &mut target).unwrap();

        let mut called = false;
        job.schedule(&mut doc, |_run, _delay| -> Result<(), ()> {
            called = true;
            Ok(())
        })
        .unwrap();
        assert!(!called);
    }
}
