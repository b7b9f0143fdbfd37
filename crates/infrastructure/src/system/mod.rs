pub mod nameserver_list;
pub mod resolv_conf;

pub use nameserver_list::NameserverList;
pub use resolv_conf::ResolvConf;
