//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard panels and the toast stack. They receive data
//! through props or context and report user intent through callbacks; the
//! pages own every network call.

pub mod budget_panel;
pub mod expense_form;
pub mod expense_list;
pub mod filter_bar;
pub mod summary_modal;
pub mod toast_stack;
