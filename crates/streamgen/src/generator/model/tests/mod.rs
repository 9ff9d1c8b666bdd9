mod wire_type;
