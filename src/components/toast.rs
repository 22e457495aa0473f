use yew::prelude::*;

use crate::error::ConsoleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    /// Assigned by the toast queue when shown.
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

impl From<&ConsoleError> for Toast {
    fn from(err: &ConsoleError) -> Self {
        Toast::error(err.user_message())
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastListProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastList)]
pub fn toast_list(props: &ToastListProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 space-y-2 w-80">
            {for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = props.on_dismiss.clone();
                let class = match toast.kind {
                    ToastKind::Success => "bg-green-600",
                    ToastKind::Error => "bg-red-600",
                };
                html! {
                    <div key={id} class={classes!("flex", "items-start", "justify-between", "p-3", "rounded", "shadow", "text-white", class)}>
                        <p class="text-sm">{&toast.message}</p>
                        <button
                            onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(id))}
                            class="ml-3 text-white opacity-75 hover:opacity-100"
                        >
                            {"✕"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toast_uses_user_message() {
        let toast = Toast::from(&ConsoleError::Server {
            status: 500,
            message: None,
        });
        assert_eq!(toast.id, 0);
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Something went wrong. Please try again");
    }
}
