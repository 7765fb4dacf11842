pub mod mails;
mod sendmail;
