//! Page counting and heading placement.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Headings this many lines or fewer after a page break are pulled back.
const ORPHAN_WINDOW: usize = 3;

/// Where a heading ends up after orphan avoidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingPlacement {
    /// Line number as given.
    pub original_position: usize,
    /// Line number after adjustment; equal to the original when unmoved.
    pub adjusted_position: usize,
    /// 1-based page number.
    pub page: usize,
}

impl HeadingPlacement {
    /// Whether orphan avoidance shifted the heading.
    pub fn was_moved(&self) -> bool {
        self.original_position != self.adjusted_position
    }
}

/// Number of pages needed for `line_count` lines.
pub fn paginate(line_count: usize, lines_per_page: usize) -> Result<usize> {
    check_lines_per_page(lines_per_page)?;
    Ok(line_count.div_ceil(lines_per_page))
}

/// Line numbers at which a new page starts, excluding the first page.
pub fn page_breaks(total_lines: usize, lines_per_page: usize) -> Result<Vec<usize>> {
    let pages = paginate(total_lines, lines_per_page)?;
    Ok((1..pages).map(|i| i * lines_per_page).collect())
}

/// Move headings that sit just after a page break to the line before it.
///
/// A heading strictly between 0 and 3 lines after a break moves to
/// `break - 1`; every other heading keeps its position. Pages are
/// `position / lines_per_page + 1` of the final position.
pub fn optimize_headings(
    heading_positions: &[usize],
    total_lines: usize,
    lines_per_page: usize,
) -> Result<Vec<HeadingPlacement>> {
    let breaks = page_breaks(total_lines, lines_per_page)?;

    let placements = heading_positions
        .iter()
        .map(|&position| {
            let adjusted = breaks
                .iter()
                .find(|&&b| position > b && position - b < ORPHAN_WINDOW)
                .map_or(position, |&b| b - 1);
            if adjusted != position {
                log::debug!("heading at line {position} moved to {adjusted}");
            }
            HeadingPlacement {
                original_position: position,
                adjusted_position: adjusted,
                page: adjusted / lines_per_page + 1,
            }
        })
        .collect();
    Ok(placements)
}

fn check_lines_per_page(lines_per_page: usize) -> Result<()> {
    if lines_per_page == 0 {
        return Err(Error::InvalidParameter(
            "lines per page must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        assert_eq!(paginate(250, 33).unwrap(), 8);
        assert_eq!(paginate(33, 33).unwrap(), 1);
        assert_eq!(paginate(34, 33).unwrap(), 2);
        assert_eq!(paginate(0, 33).unwrap(), 0);
    }

    #[test]
    fn test_paginate_zero_lines_per_page() {
        assert!(matches!(paginate(10, 0), Err(Error::InvalidParameter(_))));
        assert!(optimize_headings(&[1], 10, 0).is_err());
    }

    #[test]
    fn test_page_breaks() {
        assert_eq!(page_breaks(100, 33).unwrap(), vec![33, 66, 99]);
        assert!(page_breaks(20, 33).unwrap().is_empty());
    }

    #[test]
    fn test_heading_after_break_moves_back() {
        let placements = optimize_headings(&[34], 100, 33).unwrap();
        assert_eq!(
            placements,
            vec![HeadingPlacement {
                original_position: 34,
                adjusted_position: 32,
                page: 1,
            }]
        );
        assert!(placements[0].was_moved());
    }

    #[test]
    fn test_heading_window_bounds() {
        let placements = optimize_headings(&[33, 35, 36, 10], 100, 33).unwrap();
        // on the break itself, outside the window, and mid-page: unmoved
        assert_eq!(placements[0].adjusted_position, 33);
        assert_eq!(placements[0].page, 2);
        assert_eq!(placements[1].adjusted_position, 32);
        assert_eq!(placements[2].adjusted_position, 36);
        assert_eq!(placements[2].page, 2);
        assert_eq!(placements[3].adjusted_position, 10);
        assert_eq!(placements[3].page, 1);
    }

    #[test]
    fn test_heading_on_last_page_without_break() {
        let placements = optimize_headings(&[34], 40, 33).unwrap();
        assert_eq!(placements[0].adjusted_position, 32);
        let single_page = optimize_headings(&[2], 20, 33).unwrap();
        assert_eq!(single_page[0].adjusted_position, 2);
    }
}
