//! 食事制限フィルタコンポーネント

use leptos::prelude::*;
use ingredient_lens_common::{DietaryFilterSet, DietaryType};

#[component]
pub fn DietaryFilters<F>(
    #[prop(into)] selected: Signal<DietaryFilterSet>,
    on_toggle: F,
) -> impl IntoView
where
    F: Fn(DietaryType) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="card dietary-filters">
            <h3>"Dietary Filters"</h3>
            <div class="filter-pills">
                {DietaryType::ALL
                    .into_iter()
                    .map(|diet| {
                        let on_toggle = on_toggle.clone();
                        let is_selected = move || selected.with(|s| s.contains(diet));
                        view! {
                            <button
                                class=move || format!("filter-pill diet-{}", diet.key())
                                class:selected=is_selected
                                on:click=move |_| on_toggle(diet)
                            >
                                {diet.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || selected.with(|s| s.summary()).map(|summary| view! {
                <p class="filter-summary text-muted">{summary}</p>
            })}
        </div>
    }
}
