use crate::shared::number_format::format_money;
use contracts::domain::a005_expense::CategoryTotal;
use leptos::prelude::*;

/// Доля статьи в общей сумме, проценты 0..=100
pub fn share_percent(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (part / total * 100.0).clamp(0.0, 100.0)
    }
}

/// Статьи расходов с полосой доли; используется в списке расходов и в сводке
#[component]
pub fn CategoryTotals(#[prop(into)] totals: Signal<Vec<CategoryTotal>>) -> impl IntoView {
    view! {
        <div class="category-totals">
            {move || {
                let list = totals.get();
                let total: f64 = list.iter().map(|c| c.total).sum();
                if list.is_empty() {
                    return view! { <div class="text-muted">"Расходов за период нет"</div> }.into_any();
                }
                list.into_iter()
                    .map(|c| {
                        let width = format!("width: {:.1}%;", share_percent(c.total, total));
                        view! {
                            <div class="category-totals__row">
                                <span class="category-totals__name">{c.category.display_name()}</span>
                                <div class="category-totals__bar">
                                    <div class="category-totals__fill" style=width></div>
                                </div>
                                <span class="category-totals__amount">{format_money(c.total)}</span>
                                <span class="category-totals__count text-muted">{format!("({})", c.count)}</span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::share_percent;

    #[test]
    fn share_handles_zero_total() {
        assert_eq!(share_percent(10.0, 0.0), 0.0);
        assert_eq!(share_percent(25.0, 100.0), 25.0);
        assert_eq!(share_percent(150.0, 100.0), 100.0);
    }
}
