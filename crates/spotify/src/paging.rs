use crate::error::Error;
use crate::model::Page;

/// Accumulates a paginated listing, starting from its first page.
///
/// Pages are fetched through `fetch_next` with the previous page's `next`
/// URL until the accumulated count reaches the reported total, or a page
/// comes back empty, or there is no `next` link. Returns `None` if the
/// first page has no items.
pub(crate) async fn collect_pages<T, F, Fut>(
    first: Page<T>,
    mut fetch_next: F,
) -> Result<Option<Vec<T>>, Error>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    if first.items.is_empty() {
        return Ok(None);
    }

    let total = first.total as usize;
    let mut next = first.next;
    let mut items = first.items;
    while items.len() < total {
        let Some(url) = next.take() else {
            debug!("stopped at {} of {total} items: no next page", items.len());
            break;
        };
        let page = fetch_next(url).await?;
        if page.items.is_empty() {
            debug!("stopped at {} of {total} items: empty page", items.len());
            break;
        }
        next = page.next;
        items.extend(page.items);
    }
    Ok(Some(items))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::future::ready;

    use super::*;
    use crate::error::ErrorKind;

    fn page(items: &[u32], total: u32, next: Option<&str>) -> Page<u32> {
        Page {
            items: items.to_vec(),
            total,
            next: next.map(ToOwned::to_owned),
            limit: 2,
            offset: 0,
        }
    }

    #[tokio::test]
    async fn test_pages_accumulate_in_order() {
        let mut rest = VecDeque::from([
            page(&[3, 4], 5, Some("page-3")),
            page(&[5], 5, None),
        ]);
        let requested = RefCell::new(Vec::new());
        let items = collect_pages(page(&[1, 2], 5, Some("page-2")), |url| {
            requested.borrow_mut().push(url);
            ready(Ok(rest.pop_front().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(items, Some(vec![1, 2, 3, 4, 5]));
        assert_eq!(*requested.borrow(), ["page-2", "page-3"]);
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let items = collect_pages(page(&[], 0, None), |_| {
            ready(Err(Error::new("unreachable", ErrorKind::Http)))
        })
        .await
        .unwrap();
        assert_eq!(items, None);
    }

    #[tokio::test]
    async fn test_short_listing_stops_early() {
        // The server claims more items than it ever hands out.
        let items = collect_pages(page(&[1, 2], 9, Some("page-2")), |_| {
            ready(Ok(page(&[], 9, Some("page-3"))))
        })
        .await
        .unwrap();
        assert_eq!(items, Some(vec![1, 2]));

        let items = collect_pages(page(&[1, 2], 9, None), |_| {
            ready(Err(Error::new("unreachable", ErrorKind::Http)))
        })
        .await
        .unwrap();
        assert_eq!(items, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_fetch_error() {
        let err = collect_pages(page(&[1, 2], 5, Some("page-2")), |_| {
            ready(Err(Error::new("bad gateway", ErrorKind::Status(502))))
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status(502));
    }
}
