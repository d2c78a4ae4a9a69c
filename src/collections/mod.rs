pub mod forward_list;
