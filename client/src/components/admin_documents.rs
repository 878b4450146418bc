//! Admin console: review queue for unverified member documents.

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::components::document_panel::document_type_label;
use crate::net::types::Document;
use crate::state::remote::{Remote, load_into, spawn_api};
use crate::util::format::format_optional_date;

#[component]
pub fn AdminDocuments() -> impl IntoView {
    let pending = RwSignal::new(Remote::<Vec<Document>>::Loading);
    let action_error = RwSignal::new(None::<String>);
    let busy_id = RwSignal::new(None::<String>);

    let reload = move || load_into(pending, |api| async move { api.admin_documents(Some(false)).await });
    reload();

    // Either decision takes the document out of the queue.
    let review = move |document_id: String, verified: bool| {
        busy_id.set(Some(document_id.clone()));
        action_error.set(None);
        spawn_api(move |api| async move {
            match api.verify_document(&document_id, verified).await {
                Ok(_) => pending.update(|p| p.update_ready(|list| list.retain(|d| d.id != document_id))),
                Err(e) => action_error.set(Some(e.to_string())),
            }
            busy_id.set(None);
        });
    };

    view! {
        <section class="admin-documents">
            {move || action_error.get().map(|msg| view! { <Alert message=msg/> })}
            {move || match pending.get() {
                Remote::Loading => view! { <p>"Loading documents..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(list) if list.is_empty() => {
                    view! { <p class="panel__empty">"No documents waiting for review."</p> }.into_any()
                }
                Remote::Ready(list) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Member"</th>
                                    <th>"Document"</th>
                                    <th>"Type"</th>
                                    <th>"Uploaded"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|doc| {
                                        let id = doc.id.clone();
                                        let busy = move || busy_id.get().as_deref() == Some(id.as_str());
                                        let verify_id = doc.id.clone();
                                        let reject_id = doc.id.clone();
                                        view! {
                                            <tr>
                                                <td>{doc.owner_name.clone().unwrap_or_else(|| "-".to_owned())}</td>
                                                <td>
                                                    <a href=doc.file_url.clone() target="_blank" rel="noopener">
                                                        {doc.name.clone()}
                                                    </a>
                                                </td>
                                                <td>{document_type_label(&doc.doc_type).to_owned()}</td>
                                                <td>{format_optional_date(doc.uploaded_at.as_ref())}</td>
                                                <td class="table__actions">
                                                    <button
                                                        class="btn btn--primary"
                                                        disabled=busy.clone()
                                                        on:click=move |_| review(verify_id.clone(), true)
                                                    >
                                                        "Verify"
                                                    </button>
                                                    <button
                                                        class="btn btn--danger"
                                                        disabled=busy
                                                        on:click=move |_| review(reject_id.clone(), false)
                                                    >
                                                        "Reject"
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
        </section>
    }
}
