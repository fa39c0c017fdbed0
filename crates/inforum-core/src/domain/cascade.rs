/// Collections that hold rows referencing a blog post, directly or through a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependent {
    SubComments,
    Comments,
    Stars,
}

/// Purge order for removing a post.
///
/// Sub-comments reference comments, and comments and stars reference the
/// post, so each step only removes rows nothing else still points at. The
/// post itself goes last.
pub const CASCADE_ORDER: [Dependent; 3] =
    [Dependent::SubComments, Dependent::Comments, Dependent::Stars];

/// Rows removed by a cascading post delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub sub_comments: u64,
    pub comments: u64,
    pub stars: u64,
}

impl CascadeReport {
    pub fn record(&mut self, dependent: Dependent, rows: u64) {
        match dependent {
            Dependent::SubComments => self.sub_comments += rows,
            Dependent::Comments => self.comments += rows,
            Dependent::Stars => self.stars += rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(dependent: Dependent) -> usize {
        CASCADE_ORDER
            .iter()
            .position(|d| *d == dependent)
            .expect("dependent missing from cascade order")
    }

    #[test]
    fn test_replies_purged_before_comments() {
        assert!(position(Dependent::SubComments) < position(Dependent::Comments));
    }

    #[test]
    fn test_every_dependent_purged_once() {
        for dependent in [Dependent::SubComments, Dependent::Comments, Dependent::Stars] {
            assert_eq!(CASCADE_ORDER.iter().filter(|d| **d == dependent).count(), 1);
        }
    }

    #[test]
    fn test_report_accumulates() {
        let mut report = CascadeReport::default();
        report.record(Dependent::Stars, 2);
        report.record(Dependent::Stars, 1);
        report.record(Dependent::Comments, 4);
        assert_eq!(report.stars, 3);
        assert_eq!(report.comments, 4);
        assert_eq!(report.sub_comments, 0);
    }
}
