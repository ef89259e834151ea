mod test_answer_dedup;
mod test_ice_candidate_order;
