/// A contiguous run of top-level JSON array elements: `limit` elements after
/// skipping `skip`. `limit: None` means "everything from `skip` onward".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordWindow {
    pub skip: usize,
    pub limit: Option<usize>,
}

impl RecordWindow {
    pub const ALL: RecordWindow = RecordWindow {
        skip: 0,
        limit: None,
    };
}

#[derive(Debug)]
pub struct RecordWindowSlicer {
    total_records: usize,
    max_records_per_window: Option<usize>,
}

impl RecordWindowSlicer {
    /// A zero row limit is treated like no limit at all.
    pub fn new(total_records: usize, max_records_per_window: Option<usize>) -> Self {
        Self {
            total_records,
            max_records_per_window: max_records_per_window.filter(|limit| *limit > 0),
        }
    }

    /// Without a limit this yields exactly one unbounded window, even for an
    /// empty array; with a limit `W` it yields `ceil(total / W)` windows.
    pub fn iter_windows(&self) -> Box<dyn Iterator<Item = RecordWindow> + '_> {
        match self.max_records_per_window {
            None => Box::new(std::iter::once(RecordWindow::ALL)),
            Some(limit) => Box::new((0..self.total_records).step_by(limit).map(move |skip| {
                RecordWindow {
                    skip,
                    limit: Some(limit),
                }
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordWindow, RecordWindowSlicer};

    fn skips(total: usize, limit: Option<usize>) -> Vec<usize> {
        RecordWindowSlicer::new(total, limit)
            .iter_windows()
            .map(|window| window.skip)
            .collect()
    }

    #[test]
    fn exact_multiple_yields_full_windows() {
        assert_eq!(skips(20, Some(2)), vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn remainder_yields_one_short_window() {
        assert_eq!(skips(7, Some(2)), vec![0, 2, 4, 6]);
        assert_eq!(skips(3, Some(2)), vec![0, 2]);
        assert_eq!(skips(1, Some(2)), vec![0]);
    }

    #[test]
    fn window_count_is_ceiling_of_total_over_limit() {
        for total in 0..40usize {
            for limit in 1..9usize {
                let windows = RecordWindowSlicer::new(total, Some(limit))
                    .iter_windows()
                    .collect::<Vec<_>>();
                assert_eq!(windows.len(), total.div_ceil(limit));
                assert!(windows.iter().all(|window| window.limit == Some(limit)));
            }
        }
    }

    #[test]
    fn no_limit_yields_single_unbounded_window() {
        let windows = RecordWindowSlicer::new(5, None)
            .iter_windows()
            .collect::<Vec<_>>();
        assert_eq!(windows, vec![RecordWindow::ALL]);

        let windows = RecordWindowSlicer::new(0, Some(0))
            .iter_windows()
            .collect::<Vec<_>>();
        assert_eq!(windows, vec![RecordWindow::ALL]);
    }

    #[test]
    fn empty_array_with_limit_yields_no_windows() {
        assert!(skips(0, Some(3)).is_empty());
    }
}
