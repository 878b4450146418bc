//! Member documents: multipart upload, list, delete.

#[cfg(test)]
#[path = "document_panel_test.rs"]
mod document_panel_test;

use leptos::prelude::*;

use crate::components::alert::Alert;
use crate::components::modal::Modal;
use crate::net::http::FileUpload;
use crate::net::types::{DOCUMENT_TYPES, Document};
use crate::state::remote::{Remote, load_into, spawn_api};
use crate::util::format::format_optional_date;
use crate::util::validation::required;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const ACCEPTED_CONTENT_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Human label for a document type value, falling back to the raw value.
#[must_use]
pub fn document_type_label(value: &str) -> &str {
    DOCUMENT_TYPES
        .iter()
        .find(|(v, _)| *v == value)
        .map_or(value, |(_, label)| label)
}

/// Trimmed `(name, type)` for the upload form.
///
/// # Errors
///
/// Returns an inline message for a blank name or an unknown type.
pub fn validate_document_form(name: &str, doc_type: &str) -> Result<(String, String), &'static str> {
    let name = required(name, "Give the document a name")?;
    if !DOCUMENT_TYPES.iter().any(|(v, _)| *v == doc_type) {
        return Err("Choose a document type");
    }
    Ok((name, doc_type.to_owned()))
}

/// # Errors
///
/// Returns an inline message for empty, oversized, or unsupported files.
pub fn validate_upload(file: &FileUpload) -> Result<(), &'static str> {
    if file.bytes.is_empty() {
        return Err("The selected file is empty");
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err("Files must be 5 MB or smaller");
    }
    if !ACCEPTED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err("Upload a PDF, JPEG, or PNG file");
    }
    Ok(())
}

#[cfg(feature = "hydrate")]
async fn read_selected_file(input: web_sys::HtmlInputElement) -> Option<FileUpload> {
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Some(FileUpload { file_name: file.name(), content_type: file.type_(), bytes })
}

#[component]
pub fn DocumentPanel() -> impl IntoView {
    let documents = RwSignal::new(Remote::<Vec<Document>>::Loading);
    let name = RwSignal::new(String::new());
    let doc_type = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let uploading = RwSignal::new(false);
    let pending_delete = RwSignal::new(None::<Document>);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let reload = move || load_into(documents, |api| async move { api.documents().await });
    reload();

    let on_upload = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if uploading.get_untracked() {
            return;
        }
        let (doc_name, kind) = match validate_document_form(&name.get_untracked(), &doc_type.get_untracked()) {
            Ok(fields) => fields,
            Err(msg) => {
                form_error.set(Some(msg.to_owned()));
                return;
            }
        };
        form_error.set(None);
        uploading.set(true);

        #[cfg(feature = "hydrate")]
        {
            let input = file_input.get_untracked();
            spawn_api(move |api| async move {
                let file = match input {
                    Some(input) => read_selected_file(input).await,
                    None => None,
                };
                let Some(file) = file else {
                    form_error.set(Some("Choose a file to upload".to_owned()));
                    uploading.set(false);
                    return;
                };
                if let Err(msg) = validate_upload(&file) {
                    form_error.set(Some(msg.to_owned()));
                    uploading.set(false);
                    return;
                }
                match api.upload_document(&doc_name, &kind, file).await {
                    Ok(doc) => {
                        documents.update(|d| d.update_ready(|list| list.insert(0, doc)));
                        name.set(String::new());
                    }
                    Err(e) => form_error.set(Some(e.to_string())),
                }
                uploading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (doc_name, kind, file_input);
            uploading.set(false);
        }
    };

    let on_cancel_delete = Callback::new(move |()| pending_delete.set(None));
    let on_confirm_delete = move |_| {
        let Some(doc) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        spawn_api(move |api| async move {
            match api.delete_document(&doc.id).await {
                Ok(()) => documents.update(|d| d.update_ready(|list| list.retain(|x| x.id != doc.id))),
                Err(e) => form_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <section class="panel document-panel">
            <h3>"Documents"</h3>
            <form class="document-panel__form" on:submit=on_upload>
                <input
                    class="form-field__input"
                    type="text"
                    placeholder="Document name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <select class="form-field__input" on:change=move |ev| doc_type.set(event_target_value(&ev))>
                    <option value="" selected=move || doc_type.get().is_empty()>
                        "Type..."
                    </option>
                    {DOCUMENT_TYPES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <input class="form-field__input" type="file" accept=".pdf,.jpg,.jpeg,.png" node_ref=file_input/>
                <button class="btn btn--primary" type="submit" disabled=move || uploading.get()>
                    {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>
            {move || form_error.get().map(|msg| view! { <p class="form-field__error">{msg}</p> })}
            {move || match documents.get() {
                Remote::Loading => view! { <p>"Loading documents..."</p> }.into_any(),
                Remote::Failed(msg) => {
                    view! { <Alert message=msg on_retry=Callback::new(move |()| reload())/> }.into_any()
                }
                Remote::Ready(list) if list.is_empty() => {
                    view! { <p class="panel__empty">"No documents uploaded yet."</p> }.into_any()
                }
                Remote::Ready(list) => {
                    view! {
                        <ul class="document-list">
                            {list
                                .into_iter()
                                .map(|doc| {
                                    let label = document_type_label(&doc.doc_type).to_owned();
                                    let uploaded = format_optional_date(doc.uploaded_at.as_ref());
                                    let verified = doc.verified;
                                    let href = doc.file_url.clone();
                                    let name = doc.name.clone();
                                    view! {
                                        <li class="document-list__item">
                                            <a href=href target="_blank" rel="noopener">
                                                {name}
                                            </a>
                                            <span class="document-list__type">{label}</span>
                                            <span class="document-list__date">{uploaded}</span>
                                            <span class="status-pill" class:status-pill--completed=verified>
                                                {if verified { "Verified" } else { "Pending review" }}
                                            </span>
                                            <button
                                                class="btn btn--danger"
                                                on:click=move |_| pending_delete.set(Some(doc.clone()))
                                            >
                                                "Delete"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    }
                        .into_any()
                }
            }}
            <Show when=move || pending_delete.get().is_some()>
                <Modal title="Delete document" on_close=on_cancel_delete>
                    <p class="dialog__danger">
                        {move || {
                            format!(
                                "Delete \"{}\"? This cannot be undone.",
                                pending_delete.get().map(|d| d.name).unwrap_or_default(),
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
