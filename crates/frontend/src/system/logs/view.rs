use super::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ErrorBox;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::shared::logger::LogEntry;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SourceFilter {
    All,
    Client,
    Server,
}

impl SourceFilter {
    fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Client => entry.source == "client",
            SourceFilter::Server => entry.source == "server",
        }
    }
}

fn filter_entries(entries: &[LogEntry], source: SourceFilter, text: &str) -> Vec<LogEntry> {
    let needle = text.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| source.matches(e))
        .filter(|e| {
            needle.is_empty()
                || e.message.to_lowercase().contains(&needle)
                || e.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

fn category_color(category: &str) -> BadgeColor {
    match category {
        "ui_error" => BadgeColor::Danger,
        "cold_storage" | "kitchen" | "inventory" => BadgeColor::Warning,
        _ => BadgeColor::Informative,
    }
}

#[component]
pub fn LogsPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let entries = RwSignal::new(Vec::<LogEntry>::new());
    let error = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(false);
    let source = RwSignal::new(SourceFilter::All);
    let search = RwSignal::new(String::new());

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_logs().await {
                Ok(list) => {
                    entries.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log!("Failed to fetch logs: {}", e);
                    error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if ctx.is_active("sys_logs") {
            load();
        }
    });

    let clear = move || {
        spawn_local(async move {
            match api::clear_logs().await {
                Ok(()) => {
                    toast.success("Журнал очищен");
                    entries.set(Vec::new());
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let visible = Memo::new(move |_| {
        entries.with(|list| filter_entries(list, source.get(), &search.get()))
    });

    view! {
        <PageFrame page_id="sys_logs--list" category=PageCategory::System>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("file-text")}
                    <h1 class="page__title">"Журнал"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || visible.get().len().to_string()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || loading.get())
                        on_click=move |_| load()
                    >
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| clear()>
                        {icon("delete")}
                        " Очистить"
                    </Button>
                </div>
            </div>

            <div class="filter-panel-content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div class="form-group">
                        <label for="logs_source">"Источник"</label>
                        <select
                            id="logs_source"
                            on:change=move |ev| {
                                source.set(match event_target_value(&ev).as_str() {
                                    "client" => SourceFilter::Client,
                                    "server" => SourceFilter::Server,
                                    _ => SourceFilter::All,
                                });
                            }
                        >
                            <option value="all">"Все"</option>
                            <option value="client">"Клиент"</option>
                            <option value="server">"Сервер"</option>
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="logs_search">"Поиск"</label>
                        <input
                            type="text"
                            id="logs_search"
                            prop:value=move || search.get()
                            on:input=move |ev| search.set(event_target_value(&ev))
                        />
                    </div>
                </Flex>
            </div>

            <ErrorBox error=error />

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=160.0>"Время"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Источник"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Категория"</TableHeaderCell>
                            <TableHeaderCell min_width=400.0>"Сообщение"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|e| e.id
                            children=move |e| {
                                let color = category_color(&e.category);
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{e.timestamp}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{e.source}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Badge appearance=BadgeAppearance::Tint color=color>{e.category}</Badge>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout truncate=true>{e.message}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, source: &str, category: &str, message: &str) -> LogEntry {
        LogEntry {
            id,
            timestamp: "2026-03-01 10:00:00".into(),
            source: source.into(),
            category: category.into(),
            message: message.into(),
        }
    }

    #[test]
    fn filters_by_source_and_text() {
        let list = vec![
            entry(1, "client", "ui_error", "Сервер недоступен"),
            entry(2, "server", "inventory", "Заканчивается: молоко"),
            entry(3, "server", "cold_storage", "Холодильник 2 вне нормы"),
        ];
        assert_eq!(filter_entries(&list, SourceFilter::All, ""), list);
        assert_eq!(filter_entries(&list, SourceFilter::Server, "").len(), 2);
        let hits = filter_entries(&list, SourceFilter::All, "МОЛОКО");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        assert_eq!(filter_entries(&list, SourceFilter::Client, "cold").len(), 0);
    }
}
