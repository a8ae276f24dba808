use crate::domain::{escape_html, SiteTimezone, Sort, SortColumn, SortDirection, Subscriber};
use crate::listing::SubscriberPage;

/// Sortable columns, in display order
const COLUMNS: [(SortColumn, &str); 3] = [
    (SortColumn::Email, "Email"),
    (SortColumn::Source, "Source"),
    (SortColumn::CreatedAt, "Date"),
];

/// Admin list page
pub struct ListView<'a> {
    pub page: &'a SubscriberPage,
    pub sort: Option<Sort>,
    pub timezone: &'a SiteTimezone,
    pub delete_token: &'a str,
    pub bulk_token: &'a str,
    pub notice: Option<String>,
}

impl ListView<'_> {
    pub fn render(&self) -> String {
        format!(
            include_str!("subscribers.html"),
            notice = self.notice(),
            bulk_token = escape_html(self.bulk_token),
            pagination = self.pagination(),
            headers = self.headers(),
            rows = self.rows(),
        )
    }

    fn notice(&self) -> String {
        self.notice.as_deref().map_or_else(String::new, |notice| {
            format!(
                r#"<div class="notice notice-success"><p>{}</p></div>"#,
                escape_html(notice)
            )
        })
    }

    /// Header cells, clicking a column sorts by it and clicking it again reverses the order
    fn headers(&self) -> String {
        let mut cells =
            String::from(r#"<td class="manage-column column-cb check-column"><input type="checkbox"></td>"#);
        for (column, label) in COLUMNS {
            let (class, next) = match self.sort {
                Some(sort) if sort.column == column => (
                    format!("sorted {}", sort.direction.as_str()),
                    sort.direction.reverse(),
                ),
                _ => ("sortable asc".to_string(), SortDirection::Asc),
            };
            let sort = Sort {
                column,
                direction: next,
            };
            cells.push_str(&format!(
                r#"<th scope="col" class="manage-column column-{name} {class}"><a href="{href}">{label}</a></th>"#,
                name = column.as_str(),
                href = list_href(1, Some(sort)),
            ));
        }
        cells
    }

    fn rows(&self) -> String {
        if self.page.rows.is_empty() {
            return r#"<tr class="no-items"><td class="colspanchange" colspan="4">No data available.</td></tr>"#
                .into();
        }
        self.page
            .rows
            .iter()
            .map(|subscriber| self.row(subscriber))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn row(&self, subscriber: &Subscriber) -> String {
        let id = subscriber.id;
        let mut delete_href = format!(
            "?action=delete&email_id={id}&_wpnonce={}&page={}",
            self.delete_token, self.page.page
        );
        if let Some(sort) = self.sort {
            delete_href.push_str(&sort_params(sort));
        }

        format!(
            r#"<tr>
<th scope="row" class="check-column"><input type="checkbox" name="bulk-delete[]" value="{id}"></th>
<td class="email column-email">{email}<div class="row-actions"><span class="delete"><a href="{delete_href}">Delete</a></span></div></td>
<td class="source column-source">{source}</td>
<td class="created_at column-created_at">{date}</td>
</tr>"#,
            email = escape_html(&subscriber.email),
            delete_href = escape_html(&delete_href),
            source = escape_html(&subscriber.source),
            date = escape_html(&self.timezone.format(subscriber.created_at)),
        )
    }

    fn pagination(&self) -> String {
        let total_pages = self.page.total_pages();
        let current = u64::from(self.page.page);
        let mut nav = format!(
            r#"<div class="tablenav-pages"><span class="displaying-num">{} items</span>"#,
            self.page.total_count
        );
        if current > 1 {
            nav.push_str(&format!(
                r#" <a class="prev-page" href="{}">&laquo; Previous</a>"#,
                list_href(current - 1, self.sort)
            ));
        }
        nav.push_str(&format!(
            r#" <span class="paging-input">Page {current} of {}</span>"#,
            total_pages.max(1)
        ));
        if current < total_pages {
            nav.push_str(&format!(
                r#" <a class="next-page" href="{}">Next &raquo;</a>"#,
                list_href(current + 1, self.sort)
            ));
        }
        nav.push_str("</div>");
        nav
    }
}

/// Link to a page of the list, escaped for use in an attribute
fn list_href(page: u64, sort: Option<Sort>) -> String {
    let mut href = format!("?page={page}");
    if let Some(sort) = sort {
        href.push_str(&sort_params(sort));
    }
    escape_html(&href)
}

fn sort_params(sort: Sort) -> String {
    format!(
        "&orderby={}&order={}",
        sort.column.as_str(),
        sort.direction.as_str()
    )
}
