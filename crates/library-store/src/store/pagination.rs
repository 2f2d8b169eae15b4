//! Shared pagination helper for the Store Gateway's list/search queries.
//!
//! `page` is 1-based at the API boundary (see `library_core::PaginationParams`);
//! `sea_orm`'s paginator is 0-indexed, so the conversion happens once here.

use library_core::LibraryResult;
use library_entities::dto::Page;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Select};

pub async fn paginate<C, E>(
    conn: &C,
    query: Select<E>,
    page: u64,
    page_size: u64,
) -> LibraryResult<Page<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let paginator = query.paginate(conn, page_size);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    Ok(Page {
        items,
        total,
        page,
        page_size,
    })
}
