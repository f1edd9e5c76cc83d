mod helpers;

mod guest_test;
mod login_test;
mod token_test;
