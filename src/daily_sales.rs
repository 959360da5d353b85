//! The daily sales page that hosts the components, and the date picker
//! fragment it loads.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    AppState, Error,
    date_navigation::DateNavigation,
    date_picker::{DatePicker, DatePickerOptions, PickerEvent},
    endpoints,
    format::{calculate_amount, format_date, format_number, parse_date},
    html::{PAGE_CONTAINER_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base, render_fragment},
    page::Page,
    sub_menu::SubMenus,
    table::{Comparison, QuantityInput, achievement_cell, amount_cell, tooltip},
};

/// A product line on the daily sales page.
struct SalesLine {
    product: &'static str,
    quantity: f64,
    unit_price: f64,
    previous_amount: f64,
    target: f64,
}

const SAMPLE_LINES: [SalesLine; 4] = [
    SalesLine {
        product: "아메리카노",
        quantity: 42.0,
        unit_price: 4_500.0,
        previous_amount: 171_000.0,
        target: 200_000.0,
    },
    SalesLine {
        product: "카페라떼",
        quantity: 17.0,
        unit_price: 5_000.0,
        previous_amount: 90_000.0,
        target: 80_000.0,
    },
    SalesLine {
        product: "크루아상",
        quantity: 0.0,
        unit_price: 3_800.0,
        previous_amount: 15_200.0,
        target: 30_000.0,
    },
    SalesLine {
        product: "생수",
        quantity: 8.0,
        unit_price: 1_200.0,
        previous_amount: 9_600.0,
        target: 0.0,
    },
];

/// Only today's quantities may be edited.
const PAST_DATE_NOTICE: &str = "지난 날짜의 판매 수량은 수정할 수 없습니다.";

#[derive(Debug, Default, Deserialize)]
pub struct DailySalesQuery {
    date: Option<String>,
}

/// Show the daily sales page for the `date` query, or today.
pub async fn get_daily_sales_page(
    State(state): State<AppState>,
    Query(query): Query<DailySalesQuery>,
) -> Result<Response, Error> {
    let today = state.today()?;
    let date = match query.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today,
    };

    let page = Page::new(state.page_meta());
    let editable = date == today;
    if !editable {
        page.alerts().info(PAST_DATE_NOTICE);
    }

    let mut menus = SubMenus::new()
        .with_menu("sales-menu", &[(endpoints::DAILY_SALES, "일일 판매")])
        .with_menu("report-menu", &[(endpoints::DAILY_SALES, "월간 보고서")]);
    menus.toggle("sales-menu");

    let navigation = DateNavigation::new(date)
        .with_endpoint(endpoints::DAILY_SALES)
        .with_picker_endpoint(endpoints::DATE_PICKER);
    let picker = date_picker(today, Some(date));

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            nav class="sidebar" { (menus.render()) }

            h1 class="text-xl font-bold" { "일일 판매 현황" }

            (navigation.render())
            (picker.trigger("달력"))

            (sales_table(editable))
            (picker.render())
        }
    };

    Ok(base("일일 판매", &page, &content).into_response())
}

fn sales_table(editable: bool) -> Markup {
    let total: f64 = SAMPLE_LINES
        .iter()
        .map(|line| calculate_amount(line.quantity, line.unit_price))
        .sum();

    html! {
        table id="sales-table" class=(TABLE_STYLE)
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th { "상품" }
                    th { "수량" }
                    th { "단가" }
                    th { "금액" }
                    th { "달성률" }
                }
            }

            tbody
            {
                @for (index, line) in SAMPLE_LINES.iter().enumerate() {
                    @let amount = calculate_amount(line.quantity, line.unit_price);
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td {
                            (tooltip(
                                &format!("목표 금액: {}", format_number(Some(line.target))),
                                html! { (line.product) },
                            ))
                        }
                        td {
                            (QuantityInput::new(Some(line.quantity), editable)
                                .with_name(&format!("quantity-{index}"))
                                .render())
                        }
                        (amount_cell(Some(line.unit_price), None))
                        (amount_cell(
                            Some(amount),
                            Some(Comparison { is_increase: amount >= line.previous_amount }),
                        ))
                        (achievement_cell(amount, line.target))
                    }
                }
            }

            tfoot
            {
                tr
                {
                    th colspan="3" { "합계" }
                    (amount_cell(Some(total), None))
                    td {}
                }
            }
        }
    }
}

fn date_picker(today: Date, selected: Option<Date>) -> DatePicker {
    let picker = DatePicker::new(today);
    picker.init(
        DatePickerOptions::new()
            .grid_endpoint(endpoints::DATE_PICKER)
            .select_endpoint(endpoints::DAILY_SALES),
    );

    if let Some(selected) = selected {
        picker.set_selected_date(selected);
    }

    picker
}

#[derive(Debug, Default, Deserialize)]
pub struct DatePickerQuery {
    year: Option<i32>,
    month: Option<u8>,
    selected: Option<String>,
    open: Option<bool>,
}

/// Render the date picker modal for the month and selection in the query.
///
/// The modal is rendered open unless the query has `open=false`.
pub async fn get_date_picker(
    State(state): State<AppState>,
    Query(query): Query<DatePickerQuery>,
) -> Result<Response, Error> {
    let today = state.today()?;
    let selected = query.selected.as_deref().map(parse_date).transpose()?;
    let picker = date_picker(today, selected);

    if let Some(year) = query.year {
        picker.handle(PickerEvent::YearSelected(year));
    }

    if let Some(month) = query.month {
        let month = Month::try_from(month).map_err(|_| {
            let selected = format_date(selected);
            Error::InvalidDate(format!("{selected} (month {month})"))
        })?;
        picker.handle(PickerEvent::MonthSelected(month));
    }

    if query.open != Some(false) {
        picker.open_now();
    }

    Ok(render_fragment(StatusCode::OK, picker.render()))
}
