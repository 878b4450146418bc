//! Admin console: plan catalogue CRUD.
//!
//! DESIGN
//! ======
//! The editor works on a `PlanDraft` of raw form strings and converts it to a
//! full-replacement `PlanInput` only on save, so partially typed numbers never
//! leak into requests.

#[cfg(test)]
#[path = "admin_plans_test.rs"]
mod admin_plans_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::components::modal::Modal;
use crate::net::types::{Frequency, Plan, PlanInput, Premiums};
use crate::state::remote::{Remote, load_into, spawn_api};
use crate::util::format::format_kes;

/// Editable form state for one plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
    pub annual: String,
    /// One benefit per line.
    pub benefits: String,
    /// One `category: amount` pair per line.
    pub coverage: String,
    pub is_active: bool,
}

impl PlanDraft {
    #[must_use]
    pub fn new_plan() -> Self {
        Self { is_active: true, ..Self::default() }
    }

    #[must_use]
    pub fn from_plan(plan: &Plan) -> Self {
        let amount = |v: f64| if v == 0.0 { String::new() } else { format!("{v}") };
        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            category: plan.category.clone(),
            daily: amount(plan.premiums.daily),
            weekly: amount(plan.premiums.weekly),
            monthly: amount(plan.premiums.monthly),
            annual: amount(plan.premiums.annual),
            benefits: plan.benefits.join("\n"),
            coverage: plan
                .coverage_limits
                .iter()
                .map(|(category, limit)| format!("{category}: {limit}"))
                .collect::<Vec<_>>()
                .join("\n"),
            is_active: plan.is_active,
        }
    }

    /// # Errors
    ///
    /// Returns an inline message for the first invalid field.
    pub fn to_input(&self) -> Result<PlanInput, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Plan name is required".to_owned());
        }

        let premiums = Premiums {
            daily: parse_premium(&self.daily, Frequency::Daily)?,
            weekly: parse_premium(&self.weekly, Frequency::Weekly)?,
            monthly: parse_premium(&self.monthly, Frequency::Monthly)?,
            annual: parse_premium(&self.annual, Frequency::Annual)?,
        };
        if Frequency::ALL.iter().all(|f| premiums.for_frequency(*f) == 0.0) {
            return Err("Set a premium for at least one frequency".to_owned());
        }

        let benefits = self
            .benefits
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();

        let mut coverage_limits = BTreeMap::new();
        for (idx, line) in self.coverage.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (category, amount) = line
                .split_once(':')
                .map(|(c, a)| (normalize_category(c), parse_money(a)))
                .filter(|(c, _)| !c.is_empty())
                .ok_or_else(|| coverage_line_error(idx))?;
            let amount = amount.filter(|a| *a > 0.0).ok_or_else(|| coverage_line_error(idx))?;
            coverage_limits.insert(category, amount);
        }

        Ok(PlanInput {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            category: self.category.trim().to_ascii_lowercase(),
            premiums,
            benefits,
            coverage_limits,
            is_active: self.is_active,
        })
    }
}

fn parse_money(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_premium(raw: &str, frequency: Frequency) -> Result<f64, String> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    parse_money(raw)
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| format!("The {} premium must be a non-negative amount", frequency.as_str()))
}

fn normalize_category(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
}

fn coverage_line_error(idx: usize) -> String {
    format!("Coverage line {} must look like \"inpatient: 500000\"", idx + 1)
}

#[component]
pub fn AdminPlans() -> impl IntoView {
    let plans = RwSignal::new(Remote::<Vec<Plan>>::Loading);
    let draft = RwSignal::new(PlanDraft::new_plan());
    let editing = RwSignal::new(None::<Option<String>>);
    let pending_delete = RwSignal::new(None::<Plan>);
    let action_error = RwSignal::new(None::<String>);

    let reload = move || load_into(plans, |api| async move { api.plans().await });
    reload();

    let on_new = move |_| {
        draft.set(PlanDraft::new_plan());
        editing.set(Some(None));
    };
    let on_close_editor = Callback::new(move |()| editing.set(None));
    let on_saved = Callback::new(move |saved: Plan| {
        plans.update(|p| {
            p.update_ready(|list| match list.iter_mut().find(|x| x.id == saved.id) {
                Some(slot) => *slot = saved,
                None => list.push(saved),
            });
        });
        editing.set(None);
    });

    let on_cancel_delete = Callback::new(move |()| pending_delete.set(None));
    let on_confirm_delete = move |_| {
        let Some(plan) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        spawn_api(move |api| async move {
            match api.delete_plan(&plan.id).await {
                Ok(()) => plans.update(|p| p.update_ready(|list| list.retain(|x| x.id != plan.id))),
                Err(e) => action_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <section class="admin-plans">
            <div class="admin-toolbar">
                <button class="btn btn--primary" on:click=on_new>
                    "+ New plan"
                </button>
            </div>
            {move || action_error.get().map(|msg| view! { <Alert message=msg/> })}
            {move || match plans.get() {
                Remote::Loading => view! { <p>"Loading plans..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(list) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Plan"</th>
                                    <th>"Category"</th>
                                    <th>"Monthly"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|plan| {
                                        let edit_plan = plan.clone();
                                        let delete_plan = plan.clone();
                                        view! {
                                            <tr class:table__row--muted=!plan.is_active>
                                                <td>{plan.name.clone()}</td>
                                                <td>{plan.category.clone()}</td>
                                                <td>{format_kes(plan.premiums.monthly)}</td>
                                                <td>{if plan.is_active { "Active" } else { "Hidden" }}</td>
                                                <td class="table__actions">
                                                    <button
                                                        class="btn"
                                                        on:click=move |_| {
                                                            draft.set(PlanDraft::from_plan(&edit_plan));
                                                            editing.set(Some(Some(edit_plan.id.clone())));
                                                        }
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <button
                                                        class="btn btn--danger"
                                                        on:click=move |_| pending_delete.set(Some(delete_plan.clone()))
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
            {move || {
                editing
                    .get()
                    .map(|plan_id| {
                        view! {
                            <PlanEditor draft=draft plan_id=plan_id on_saved=on_saved on_close=on_close_editor/>
                        }
                    })
            }}
            <Show when=move || pending_delete.get().is_some()>
                <Modal title="Delete plan" on_close=on_cancel_delete>
                    <p class="dialog__danger">
                        {move || {
                            format!(
                                "Delete \"{}\"? Members already subscribed keep their cover.",
                                pending_delete.get().map(|p| p.name).unwrap_or_default(),
                            )
                        }}
                    </p>
                    <div class="dialog__actions">
                        <button class="btn" on:click=move |_| on_cancel_delete.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--danger" on:click=on_confirm_delete>
                            "Delete"
                        </button>
                    </div>
                </Modal>
            </Show>
        </section>
    }
}

fn draft_input(
    label: &'static str,
    draft: RwSignal<PlanDraft>,
    get: fn(&PlanDraft) -> String,
    set: fn(&mut PlanDraft, String),
) -> impl IntoView {
    view! {
        <label class="form-field">
            {label}
            <input
                class="form-field__input"
                type="text"
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        </label>
    }
}

fn draft_textarea(
    label: &'static str,
    placeholder: &'static str,
    draft: RwSignal<PlanDraft>,
    get: fn(&PlanDraft) -> String,
    set: fn(&mut PlanDraft, String),
) -> impl IntoView {
    view! {
        <label class="form-field">
            {label}
            <textarea
                class="form-field__input"
                rows="4"
                placeholder=placeholder
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            ></textarea>
        </label>
    }
}

/// Create/edit dialog. `plan_id` is `None` for a new plan.
#[component]
fn PlanEditor(
    draft: RwSignal<PlanDraft>,
    plan_id: Option<String>,
    on_saved: Callback<Plan>,
    on_close: Callback<()>,
) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let title = if plan_id.is_some() { "Edit plan" } else { "New plan" };
    let plan_id = StoredValue::new(plan_id);

    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let input = match draft.with_untracked(PlanDraft::to_input) {
            Ok(input) => input,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        let id = plan_id.get_value();
        spawn_api(move |api| async move {
            let result = match id {
                Some(id) => api.update_plan(&id, &input).await,
                None => api.create_plan(&input).await,
            };
            saving.set(false);
            match result {
                Ok(plan) => on_saved.run(plan),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <div class="plan-editor">
                {draft_input("Name", draft, |d| d.name.clone(), |d, v| d.name = v)}
                {draft_input("Category", draft, |d| d.category.clone(), |d, v| d.category = v)}
                {draft_textarea("Description", "", draft, |d| d.description.clone(), |d, v| d.description = v)}
                <fieldset class="plan-editor__premiums">
                    <legend>"Premiums (KES)"</legend>
                    {draft_input("Daily", draft, |d| d.daily.clone(), |d, v| d.daily = v)}
                    {draft_input("Weekly", draft, |d| d.weekly.clone(), |d, v| d.weekly = v)}
                    {draft_input("Monthly", draft, |d| d.monthly.clone(), |d, v| d.monthly = v)}
                    {draft_input("Annual", draft, |d| d.annual.clone(), |d, v| d.annual = v)}
                </fieldset>
                {draft_textarea(
                    "Benefits",
                    "One benefit per line",
                    draft,
                    |d| d.benefits.clone(),
                    |d, v| d.benefits = v,
                )}
                {draft_textarea(
                    "Coverage limits",
                    "inpatient: 500000",
                    draft,
                    |d| d.coverage.clone(),
                    |d, v| d.coverage = v,
                )}
                <label class="form-field form-field--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.is_active)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            draft.update(|d| d.is_active = checked);
                        }
                    />
                    "Visible to members"
                </label>
                {move || error.get().map(|msg| view! { <p class="form-field__error">{msg}</p> })}
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || saving.get() on:click=on_save>
                        {move || if saving.get() { "Saving..." } else { "Save plan" }}
                    </button>
                </div>
            </div>
        </Modal>
    }
}
