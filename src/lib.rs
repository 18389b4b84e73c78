pub mod app;

pub mod event;

pub mod ui;

pub mod tui;

pub mod handler;

pub mod config;

pub mod notification;

pub mod device;

pub mod adapter;

pub mod cli;

pub mod rfkill;

pub mod mode;

pub mod reset;

pub mod agent;

pub mod call;

pub mod iwd;
