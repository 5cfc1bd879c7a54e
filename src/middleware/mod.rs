pub mod init_guard;
