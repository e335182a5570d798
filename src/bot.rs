pub mod commands;
pub mod conversation;
pub mod telegram_client;
pub mod update_handler;

#[cfg(test)]
pub mod test_support;
