//! Persistence accessors
//!
//! Free functions over `&DatabaseConnection`, one module per table, plus the
//! shared paging helper. Nothing here knows about HTTP or the acting user.

use sea_orm::{
    DatabaseConnection, EntityTrait, IdenStatic, Order, PaginatorTrait, QueryOrder, Select,
};
use serde::Deserialize;
use std::str::FromStr;

use crate::dto::Page;
use crate::error::{AppError, AppResult};

pub mod inventory;
pub mod message;
pub mod operation;
pub mod product;
pub mod transaction;
pub mod user;
pub mod warehouse;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// `?page=&size=&sortBy=&sortDir=` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// 0-based page index
    pub page: Option<u64>,
    pub size: Option<u64>,
    /// Column name, snake_case or camelCase
    pub sort_by: Option<String>,
    /// `desc` (any case) sorts descending, anything else ascending
    pub sort_dir: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// `page()`, rejected when its row offset does not fit a SQL BIGINT
    pub fn checked_page(&self) -> AppResult<u64> {
        let page = self.page();
        match page.checked_mul(self.size()) {
            Some(offset) if offset <= i64::MAX as u64 => Ok(page),
            _ => Err(AppError::BadRequest(format!("Page index {} is out of range", page))),
        }
    }

    /// Resolve the requested order, falling back to the endpoint default
    pub fn order<C>(&self, default_sort: C, default_dir: Order) -> AppResult<(C, Order)>
    where
        C: FromStr + IdenStatic,
    {
        let column = match self.sort_by.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => C::from_str(name)
                .map_err(|_| AppError::BadRequest(format!("No property '{}' found", name)))?,
            _ => default_sort,
        };
        let dir = match self.sort_dir.as_deref() {
            Some(dir) if dir.eq_ignore_ascii_case("desc") => Order::Desc,
            Some(_) => Order::Asc,
            None => default_dir,
        };
        Ok((column, dir))
    }
}

/// Run `select` as one page of results
pub async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    params: &PageParams,
    default_sort: E::Column,
    default_dir: Order,
) -> AppResult<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let (column, dir) = params.order(default_sort, default_dir)?;
    let page = params.checked_page()?;
    let size = params.size();

    let paginator = select.order_by(column, dir).paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let content = paginator.fetch_page(page).await?;

    Ok(Page::new(
        content,
        page,
        size,
        totals.number_of_items,
        totals.number_of_pages,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::user;

    fn params(sort_by: Option<&str>, sort_dir: Option<&str>) -> PageParams {
        PageParams {
            page: None,
            size: None,
            sort_by: sort_by.map(String::from),
            sort_dir: sort_dir.map(String::from),
        }
    }

    #[test]
    fn test_size_clamped() {
        let mut p = PageParams::default();
        assert_eq!(p.size(), 10);
        p.size = Some(0);
        assert_eq!(p.size(), 1);
        p.size = Some(5000);
        assert_eq!(p.size(), 100);
    }

    #[test]
    fn test_page_offset_bounds() {
        let mut p = PageParams::default();
        assert_eq!(p.checked_page().unwrap(), 0);
        p.page = Some(3);
        assert_eq!(p.checked_page().unwrap(), 3);

        p.page = Some(u64::MAX);
        let err = p.checked_page().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("out of range")));

        p.page = Some(i64::MAX as u64 / 10 + 1);
        assert!(p.checked_page().is_err());
    }

    #[test]
    fn test_sort_column_names() {
        let (col, dir) = params(Some("codeName"), Some("DESC"))
            .order(user::Column::Username, Order::Asc)
            .unwrap();
        assert_eq!(col.as_str(), "code_name");
        assert_eq!(dir, Order::Desc);

        let (col, dir) = params(Some("created_at"), Some("sideways"))
            .order(user::Column::Username, Order::Desc)
            .unwrap();
        assert_eq!(col.as_str(), "created_at");
        assert_eq!(dir, Order::Asc);
    }

    #[test]
    fn test_default_order() {
        let (col, dir) = params(None, None)
            .order(user::Column::Username, Order::Desc)
            .unwrap();
        assert_eq!(col.as_str(), "username");
        assert_eq!(dir, Order::Desc);
    }

    #[test]
    fn test_unknown_sort_column() {
        let err = params(Some("shoeSize"), None)
            .order(user::Column::Username, Order::Asc)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "No property 'shoeSize' found"));
    }
}
