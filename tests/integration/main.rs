mod env_config;
mod pool_fanout;
mod udp_end_to_end;
