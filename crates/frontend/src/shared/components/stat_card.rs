use crate::shared::icons::icon;
use leptos::prelude::*;

/// Цветовая окраска карточки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTone {
    Neutral,
    Good,
    Warning,
    Bad,
}

impl StatTone {
    fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-card",
            StatTone::Good => "stat-card stat-card--success",
            StatTone::Warning => "stat-card stat-card--warning",
            StatTone::Bad => "stat-card stat-card--error",
        }
    }

    /// Ненулевой счётчик проблем окрашивается, нулевой нейтрален
    pub fn for_problem_count(count: usize, severe: bool) -> Self {
        match (count, severe) {
            (0, _) => StatTone::Neutral,
            (_, true) => StatTone::Bad,
            (_, false) => StatTone::Warning,
        }
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    tone: Signal<StatTone>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class=move || tone.get().class()>
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">{move || value.get()}</div>
            {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::StatTone;

    #[test]
    fn zero_problems_are_neutral() {
        assert_eq!(StatTone::for_problem_count(0, true), StatTone::Neutral);
        assert_eq!(StatTone::for_problem_count(2, false), StatTone::Warning);
        assert_eq!(StatTone::for_problem_count(1, true), StatTone::Bad);
    }
}
