mod job_rerun;
mod service_stack;
