use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::grant::{format_size, GrantError, ProofImage, MAX_PROOF_BYTES};

/// Reads a picked or dropped file into a data URL, rejecting non-images
/// and oversized files before touching their contents.
pub async fn read_proof(file: File) -> Result<ProofImage, GrantError> {
    let mime_type = file.type_();
    ProofImage::check(&mime_type, file.size() as u64)?;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| GrantError::Unreadable(format!("{:?}", e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    ProofImage::from_bytes(&file.name(), &mime_type, &bytes)
}

#[derive(Properties, PartialEq)]
pub struct FileDropProps {
    pub proof: Option<ProofImage>,
    #[prop_or_default]
    pub busy: bool,
    pub on_file: Callback<File>,
    pub on_clear: Callback<()>,
}

#[function_component(FileDrop)]
pub fn file_drop(props: &FileDropProps) -> Html {
    let dragging = use_state(|| false);

    if let Some(proof) = &props.proof {
        return html! {
            <div class="p-3 border rounded space-y-2">
                <img src={proof.data_url.clone()} alt="Payment proof preview" class="max-h-48 rounded" />
                <div class="flex justify-between items-center text-sm">
                    <span>{format!("{} ({})", proof.file_name, proof.size_label())}</span>
                    <button
                        type="button"
                        onclick={props.on_clear.reform(|_: MouseEvent| ())}
                        class="text-red-500 hover:text-red-600"
                    >
                        {"Remove"}
                    </button>
                </div>
            </div>
        };
    }

    let ondragover = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };
    let ondragleave = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(false))
    };
    let ondrop = {
        let dragging = dragging.clone();
        let on_file = props.on_file.clone();
        let busy = props.busy;
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            if busy {
                return;
            }
            if let Some(file) = e
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                on_file.emit(file);
            }
        })
    };
    let onchange = {
        let on_file = props.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file.emit(file);
            }
            input.set_value("");
        })
    };

    html! {
        <label
            {ondragover}
            {ondragleave}
            {ondrop}
            class={classes!(
                "block", "p-6", "border-2", "border-dashed", "rounded", "text-center", "cursor-pointer",
                if *dragging { "border-blue-500 bg-blue-50" } else { "border-gray-300" }
            )}
        >
            <input type="file" accept="image/*" class="hidden" {onchange} disabled={props.busy} />
            <p class="text-sm text-gray-600">
                {if props.busy { "Reading file..." } else { "Drop the payment screenshot here or click to browse" }}
            </p>
            <p class="text-xs text-gray-400 mt-1">
                {format!("Images only, up to {}", format_size(MAX_PROOF_BYTES))}
            </p>
        </label>
    }
}
