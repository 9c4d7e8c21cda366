/// A validated pagination request.
///
/// Page numbers are 0-based. The requested size is clamped into
/// `1..=max_size` at construction, so a caller asking for more rows than
/// the configured maximum silently gets the maximum (not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    pub fn of(number: u32, size: u32, max_size: u32) -> Self {
        Self {
            number,
            size: size.clamp(1, max_size.max(1)),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row offset of the first element of this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.number) * i64::from(self.size)
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One bounded slice of a larger ordered result set.
///
/// `content` and `total_pages` are computed from a single count read; when
/// the backing store changes between the count and the slice reads the
/// guarantee is best-effort (no snapshot isolation is used).
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        let total_pages = total_elements.div_ceil(size) as u32;

        Self {
            content,
            page_number: request.number(),
            page_size: request.size(),
            total_elements,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped_to_the_configured_maximum() {
        let request = PageRequest::of(0, 50, 10);
        assert_eq!(request.size(), 10);

        // Within bounds the requested size is kept as-is.
        assert_eq!(PageRequest::of(0, 5, 10).size(), 5);
    }

    #[test]
    fn size_zero_is_raised_to_one() {
        assert_eq!(PageRequest::of(0, 0, 10).size(), 1);
    }

    #[test]
    fn offset_and_limit_follow_the_page_number() {
        let request = PageRequest::of(2, 5, 10);
        assert_eq!(request.offset(), 10);
        assert_eq!(request.limit(), 5);
    }

    #[test]
    fn total_pages_is_the_ceiling_of_count_over_size() {
        let page = Page::new(vec![1, 2, 3, 4, 5], PageRequest::of(0, 5, 10), 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 12);

        let exact = Page::<i32>::new(vec![], PageRequest::of(0, 5, 10), 10);
        assert_eq!(exact.total_pages, 2);

        let empty = Page::<i32>::new(vec![], PageRequest::of(0, 5, 10), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn page_past_the_end_keeps_the_real_total() {
        let page = Page::<i32>::new(vec![], PageRequest::of(3, 5, 10), 12);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);
    }
}
